use crate::error::{Error, Result};
use crate::tutor::ContentLibrary;
use std::fs;
use std::path::PathBuf;

/// Overrides the app data directory
pub const DATA_DIR_ENV: &str = "RECALL_COACH_DATA_DIR";

const CONTENT_FILE: &str = "tutor_content.json";

/// Get the app data directory
pub fn get_app_data_dir() -> Result<PathBuf> {
    // Check if custom data dir is set via environment variable
    if let Ok(custom_dir) = std::env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(custom_dir));
    }

    dirs::data_dir()
        .map(|p| p.join("recall-coach"))
        .ok_or(Error::NoDataDir)
}

/// Initialize storage directories
pub fn init_storage() -> Result<PathBuf> {
    let app_dir = get_app_data_dir()?;
    fs::create_dir_all(app_dir.join("logs"))?;
    Ok(app_dir)
}

/// Location of a user-supplied concept library
pub fn tutor_content_path() -> Result<PathBuf> {
    Ok(get_app_data_dir()?.join(CONTENT_FILE))
}

/// Load the concept library from the data directory, or the bundled one if none is there
pub fn load_tutor_content() -> Result<ContentLibrary> {
    let path = tutor_content_path()?;

    if !path.exists() {
        tracing::warn!("Content file not found: {}, using bundled concepts", path.display());
        return ContentLibrary::bundled();
    }

    let library = ContentLibrary::from_path(&path)?;
    tracing::info!("Loaded {} concepts from {}", library.len(), path.display());
    Ok(library)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_data_dir<T>(dir: &std::path::Path, f: impl FnOnce() -> T) -> T {
        std::env::set_var(DATA_DIR_ENV, dir);
        let result = f();
        std::env::remove_var(DATA_DIR_ENV);
        result
    }

    #[test]
    #[serial]
    fn test_data_dir_override() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = with_data_dir(tmp.path(), || get_app_data_dir().unwrap());
        assert_eq!(dir, tmp.path());
    }

    #[test]
    #[serial]
    fn test_init_storage_creates_logs_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("nested");
        let app_dir = with_data_dir(&root, || init_storage().unwrap());
        assert!(app_dir.join("logs").is_dir());
    }

    #[test]
    #[serial]
    fn test_missing_content_falls_back_to_bundled() {
        let tmp = tempfile::tempdir().unwrap();
        let library = with_data_dir(tmp.path(), || load_tutor_content().unwrap());
        assert_eq!(library.len(), ContentLibrary::bundled().unwrap().len());
    }

    #[test]
    #[serial]
    fn test_loads_content_from_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let json = r#"[{"id":"recursion","title":"Recursion","summary":"A function calling itself.","sample_question":"What is a base case?"}]"#;
        fs::write(tmp.path().join(CONTENT_FILE), json).unwrap();

        let library = with_data_dir(tmp.path(), || load_tutor_content().unwrap());
        assert_eq!(library.len(), 1);
        assert!(library.find("Recursion").is_some());
    }

    #[test]
    #[serial]
    fn test_broken_content_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(CONTENT_FILE), "{ not json").unwrap();

        let err = with_data_dir(tmp.path(), || load_tutor_content().unwrap_err());
        assert!(matches!(err, Error::ContentParse { .. }));
    }
}
