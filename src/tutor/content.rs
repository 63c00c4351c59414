use crate::error::{Error, Result};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const BUNDLED_PATH: &str = "data/tutor_content.json";
const BUNDLED_CONTENT: &str = include_str!("../../data/tutor_content.json");

/// A programming concept the coach can teach, quiz on, or listen to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concept {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub sample_question: String,
}

/// Ordered set of concepts available in a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLibrary {
    concepts: Vec<Concept>,
}

impl ContentLibrary {
    pub fn new(concepts: Vec<Concept>) -> Result<Self> {
        if concepts.is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(Self { concepts })
    }

    /// Concepts compiled into the binary
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CONTENT, Path::new(BUNDLED_PATH))
    }

    pub fn from_json_str(json: &str, path: &Path) -> Result<Self> {
        let concepts = serde_json::from_str(json).map_err(|source| Error::ContentParse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::new(concepts)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json_str(&json, path)
    }

    /// Look up a concept by id (case-insensitive on the argument)
    pub fn find(&self, id: &str) -> Option<&Concept> {
        let id = id.to_lowercase();
        self.concepts.iter().find(|c| c.id == id)
    }

    pub fn random(&self) -> Option<&Concept> {
        self.concepts.choose(&mut rand::thread_rng())
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.concepts.iter().map(|c| c.id.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Concept> {
        self.concepts.iter()
    }

    pub fn len(&self) -> usize {
        self.concepts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Concept ids as prose: "a, b, and c"
    pub fn available_list(&self) -> String {
        let ids: Vec<&str> = self.ids().collect();
        match ids.as_slice() {
            [] => String::new(),
            [only] => only.to_string(),
            [first, second] => format!("{} and {}", first, second),
            [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
        }
    }
}
