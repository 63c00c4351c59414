use crate::error::Result;
use chrono::Local;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "info";

/// Initialize logger and create session log file
///
/// The terminal belongs to the TUI, so nothing is written to the console.
/// `RUST_LOG` overrides the default filter.
pub fn init_logger(app_dir: &Path) -> Result<PathBuf> {
    let log_dir = app_dir.join("logs");
    fs::create_dir_all(&log_dir)?;

    let session_file = session_log_path(&log_dir);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&session_file)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(true)
                .with_writer(Mutex::new(file)),
        )
        .try_init()?;

    Ok(session_file)
}

fn session_log_path(log_dir: &Path) -> PathBuf {
    log_dir.join(format!(
        "session-{}.log",
        Local::now().format("%Y%m%d-%H%M%S")
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_log_name() {
        let path = session_log_path(Path::new("/tmp/logs"));
        let name = path.file_name().unwrap().to_string_lossy().to_string();

        assert!(name.starts_with("session-"));
        assert!(name.ends_with(".log"));
        // session-YYYYmmdd-HHMMSS.log
        assert_eq!(name.len(), "session-".len() + 15 + ".log".len());
    }

    #[test]
    fn test_init_logger_writes_to_session_file() {
        let tmp = tempfile::tempdir().unwrap();
        let session_file = init_logger(tmp.path()).unwrap();
        assert!(session_file.exists());

        tracing::warn!("logger smoke test");
        let contents = fs::read_to_string(&session_file).unwrap();
        assert!(contents.contains("logger smoke test"));

        // A second global subscriber is refused
        assert!(init_logger(tmp.path()).is_err());
    }
}
