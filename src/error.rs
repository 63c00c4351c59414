use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Could not determine app data directory")]
    NoDataDir,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse tutor content {}: {source}", .path.display())]
    ContentParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Tutor content has no concepts")]
    EmptyContent,

    #[error("Failed to initialize logger: {0}")]
    Logger(#[from] tracing_subscriber::util::TryInitError),

    #[error("Sorry, '{0}' is not a valid mode. Please choose 'learn', 'quiz', or 'teach back'.")]
    InvalidMode(String),

    #[error("I don't have information about '{id}'. Available concepts are: {available}.")]
    UnknownConcept { id: String, available: String },
}
