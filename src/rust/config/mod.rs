//! YAML configuration loading.
//!
//! [`load_config`] reads a file into a [`ConfigBox`], which offers both
//! subscript (`cfg["model"]["epochs"]`) and field-style
//! (`cfg.section("model")?.value::<u64>("epochs")?`) access.

mod config_box;
mod error;
mod loader;

pub use config_box::ConfigBox;
pub use error::ConfigError;
pub use loader::{default_config_path, load_config, CONFIG_ENV_VAR};
