use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// How the coach works with the learner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LearningMode {
    /// Coach explains concepts with examples
    Learn,
    /// Coach asks questions to test knowledge
    Quiz,
    /// Learner explains concepts back to the coach
    TeachBack,
}

/// Named coach voice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persona {
    Matthew,
    Alicia,
    Ken,
}

impl Persona {
    pub fn name(self) -> &'static str {
        match self {
            Persona::Matthew => "Matthew",
            Persona::Alicia => "Alicia",
            Persona::Ken => "Ken",
        }
    }

    /// The persona that greets before any mode is chosen
    pub fn greeter() -> Self {
        Persona::Matthew
    }
}

impl LearningMode {
    pub const ALL: [LearningMode; 3] = [LearningMode::Learn, LearningMode::Quiz, LearningMode::TeachBack];

    pub fn as_str(self) -> &'static str {
        match self {
            LearningMode::Learn => "learn",
            LearningMode::Quiz => "quiz",
            LearningMode::TeachBack => "teach_back",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LearningMode::Learn => "Learn",
            LearningMode::Quiz => "Quiz",
            LearningMode::TeachBack => "Teach Back",
        }
    }

    pub fn persona(self) -> Persona {
        match self {
            LearningMode::Learn => Persona::Matthew,
            LearningMode::Quiz => Persona::Alicia,
            LearningMode::TeachBack => Persona::Ken,
        }
    }
}

impl fmt::Display for LearningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LearningMode {
    type Err = Error;

    /// Accepts case, spacing and hyphen variants ("Teach Back", "teach-back", "teachback")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");

        match normalized.as_str() {
            "learn" => Ok(LearningMode::Learn),
            "quiz" => Ok(LearningMode::Quiz),
            "teach_back" | "teachback" | "teach" => Ok(LearningMode::TeachBack),
            _ => Err(Error::InvalidMode(normalized)),
        }
    }
}
