//! Configuration and workspace setup for the flowers image-classification project.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use flowers::{create_directories, load_config, LogFacade};
//!
//! let cfg = load_config("config/config.yaml", &LogFacade)?;
//! let epochs: u64 = cfg.section("model")?.value("epochs")?;
//! assert_eq!(cfg["model"]["epochs"].as_u64(), Some(epochs));
//!
//! create_directories(&["artifacts/models", "artifacts/logs"], true, &LogFacade)?;
//! # Ok(())
//! # }
//! ```
//!
//! Both entry points take a [`Logger`]; pass [`LogFacade`] to go through the
//! `log` crate, or a [`MemoryLogger`] to capture messages.

pub mod config;
pub mod directories;
pub mod logging;

pub use config::{default_config_path, load_config, ConfigBox, ConfigError};
pub use directories::{create_directories, directories_to_create, ensure_directory, DirectoryError};
pub use logging::{init_logger, LogFacade, LogSettings, Logger, MemoryLogger};

/// Any failure surfaced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Directory(#[from] DirectoryError),
}

pub type Result<T> = std::result::Result<T, Error>;
