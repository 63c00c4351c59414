use super::content::{Concept, ContentLibrary};
use super::mode::{LearningMode, Persona};
use crate::error::{Error, Result};

/// State of one learning session: chosen mode and concept under discussion
#[derive(Debug, Clone)]
pub struct TutorSession {
    library: ContentLibrary,
    current_mode: Option<LearningMode>,
    current_concept: Option<Concept>,
}

impl TutorSession {
    pub fn new(library: ContentLibrary) -> Self {
        Self {
            library,
            current_mode: None,
            current_concept: None,
        }
    }

    pub fn library(&self) -> &ContentLibrary {
        &self.library
    }

    pub fn current_mode(&self) -> Option<LearningMode> {
        self.current_mode
    }

    pub fn current_concept(&self) -> Option<&Concept> {
        self.current_concept.as_ref()
    }

    /// Forget mode and concept; called whenever a new session starts
    pub fn reset(&mut self) {
        self.current_mode = None;
        self.current_concept = None;
    }

    /// Persona currently speaking
    pub fn speaker(&self) -> Persona {
        self.current_mode
            .map(LearningMode::persona)
            .unwrap_or_else(Persona::greeter)
    }

    /// Opening message before any mode is chosen
    pub fn greeting(&self) -> String {
        let topics: String = self
            .library
            .iter()
            .map(|c| format!("\n• {}: {}", c.title, first_sentence(&c.summary)))
            .collect();

        format!(
            "Hello! Welcome to your Active Recall Coach! I'm {}, and I'm here to help you \
             master programming concepts through active learning.\n\n\
             There are three ways to practice:\n\
             1. LEARN - I explain concepts with examples and analogies (Matthew)\n\
             2. QUIZ - I ask questions to test what you know (Alicia)\n\
             3. TEACH BACK - you explain a concept and I give feedback (Ken)\n\n\
             Available concepts:{}\n\n\
             Which mode would you like to start with today?",
            Persona::greeter().name(),
            topics
        )
    }

    /// Switch to a learning mode named in free text
    pub fn switch_mode(&mut self, input: &str) -> Result<String> {
        let mode: LearningMode = input.parse()?;
        self.current_mode = Some(mode);
        tracing::info!("Switching to mode: {}", mode.as_str());

        let topics: String = self.library.iter().map(|c| format!("\n• {}", c.title)).collect();

        let reply = match mode {
            LearningMode::Learn => format!(
                "Hello! I'm {}, your learning guide. I'm so glad you chose Learn mode!\n\n\
                 I'll explain programming concepts in a clear, friendly way with lots of examples.\n\n\
                 We can explore these topics together:{}\n\n\
                 What would you like to learn about first?",
                mode.persona().name(),
                topics
            ),
            LearningMode::Quiz => format!(
                "Hey there! I'm {}, and I'm excited to be your quiz master!\n\n\
                 Quiz mode tests what you know and shows you what you've mastered. \
                 I'll be encouraging throughout!\n\n\
                 I can quiz you on:{}\n\n\
                 Which topic would you like to be quizzed on?",
                mode.persona().name(),
                topics
            ),
            LearningMode::TeachBack => format!(
                "Hi! I'm {}, your learning coach. Welcome to Teach Back mode!\n\n\
                 This is where YOU become the teacher. Explaining a concept in your own words \
                 is one of the best ways to understand it, and I'll give you feedback.\n\n\
                 You can teach me about:{}\n\n\
                 Which concept would you like to explain to me?",
                mode.persona().name(),
                topics
            ),
        };

        Ok(reply)
    }

    /// Select a concept by id and describe it
    pub fn get_concept(&mut self, concept_id: &str) -> Result<String> {
        let concept = self
            .library
            .find(concept_id)
            .cloned()
            .ok_or_else(|| Error::UnknownConcept {
                id: concept_id.to_string(),
                available: self.library.available_list(),
            })?;

        Ok(self.select(concept))
    }

    /// Select a concept at random and describe it
    pub fn random_concept(&mut self) -> Result<String> {
        let concept = self.library.random().cloned().ok_or(Error::EmptyContent)?;
        Ok(self.select(concept))
    }

    fn select(&mut self, concept: Concept) -> String {
        tracing::info!("Retrieved concept: {}", concept.title);
        let reply = describe(&concept);
        self.current_concept = Some(concept);
        reply
    }

    /// Reply to a free-text learner message
    ///
    /// Mode names switch mode and concept ids select a concept; anything else
    /// gets a prompt that depends on the mode and the concept under discussion.
    pub fn respond(&mut self, text: &str) -> String {
        let text = text.trim();

        if let Ok(reply) = self.switch_mode(text) {
            return reply;
        }
        if self.library.find(text).is_some() {
            if let Ok(reply) = self.get_concept(text) {
                return reply;
            }
        }

        let mode = match self.current_mode {
            Some(mode) => mode,
            None => {
                return "Which mode would you like to start with today? \
                        Choose learn, quiz, or teach back."
                    .to_string()
            }
        };

        let concept = match &self.current_concept {
            Some(concept) => concept,
            None => {
                return format!(
                    "Which concept would you like to work on? Available concepts are: {}.",
                    self.library.available_list()
                )
            }
        };

        match mode {
            LearningMode::Learn => format!(
                "Let's keep exploring {}. {}\n\nWhen you're ready, try this: {}",
                concept.title, concept.summary, concept.sample_question
            ),
            LearningMode::Quiz => format!(
                "Good effort! Here's how I'd put it: {}\n\nNext question on {}: {}",
                concept.summary, concept.title, concept.sample_question
            ),
            LearningMode::TeachBack => format!(
                "Thanks for explaining {}! Compare your explanation with this: {}\n\n\
                 What would you add or change?",
                concept.title, concept.summary
            ),
        }
    }
}

fn describe(concept: &Concept) -> String {
    format!(
        "Concept: {}\n\nSummary: {}\n\nSample Question: {}",
        concept.title, concept.summary, concept.sample_question
    )
}

fn first_sentence(text: &str) -> &str {
    match text.find(". ") {
        Some(idx) => &text[..idx],
        None => text.trim_end_matches('.'),
    }
}
