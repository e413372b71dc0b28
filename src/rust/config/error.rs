use std::io;
use std::path::PathBuf;

/// Everything that can go wrong while loading or reading a configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Rejected before touching the filesystem.
    #[error("Invalid config path: {0}")]
    InvalidPath(String),
    /// The file does not exist. `source` is the original I/O error.
    #[error("Config file '{}' not found.", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The file exists but holds no data (blank, comments only, or `null`).
    #[error("Config file '{}' is empty", path.display())]
    Empty { path: PathBuf },
    #[error("Error parsing YAML file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Expected a mapping at '{key}', found {found}")]
    NotAMapping { key: String, found: &'static str },
    #[error("Missing config key '{0}'")]
    MissingKey(String),
    #[error("Config key '{key}' has an unexpected type: {source}")]
    Type {
        key: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("Config does not match the expected schema: {0}")]
    Extract(#[source] serde_yaml::Error),
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}
