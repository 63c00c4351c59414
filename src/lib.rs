// Active Recall Coach - shared library for the terminal front end
pub mod config;
pub mod error;
pub mod logger;
pub mod storage;
pub mod tutor;

pub use config::{AppConfig, Theme, APP_CONFIG_DEFAULTS};
pub use error::{Error, Result};
