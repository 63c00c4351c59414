// Tutor session: learning modes, coach personas and the concept library
pub mod content;
pub mod mode;
pub mod session;

pub use content::{Concept, ContentLibrary};
pub use mode::{LearningMode, Persona};
pub use session::TutorSession;
