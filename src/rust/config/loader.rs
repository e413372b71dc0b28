use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_yaml::Value;

use super::config_box::{kind_of, ConfigBox};
use super::error::ConfigError;
use crate::logging::Logger;

/// Environment variable that overrides the default config location.
pub const CONFIG_ENV_VAR: &str = "FLOWERS_CONFIG";

const LOCAL_CONFIG: &str = "config/config.yaml";

/// Loads a YAML file into a [`ConfigBox`].
///
/// Failures are logged once through `logger` at error level and returned
/// unchanged: a missing file keeps its original `io::Error` inside
/// [`ConfigError::NotFound`], a file with no data becomes
/// [`ConfigError::Empty`], and bad syntax becomes [`ConfigError::Parse`]
/// carrying the parser's diagnostic.
pub fn load_config<P: AsRef<Path>>(
    config_file: P,
    logger: &dyn Logger,
) -> Result<ConfigBox, ConfigError> {
    let path = config_file.as_ref();
    match read_config(path) {
        Ok(config) => {
            logger.info(&format!("YAML file: {} loaded successfully", path.display()));
            Ok(config)
        }
        Err(e) => {
            logger.error(&e.to_string());
            Err(e)
        }
    }
}

fn read_config(path: &Path) -> Result<ConfigBox, ConfigError> {
    if path.as_os_str().is_empty() {
        return Err(ConfigError::InvalidPath("path is empty".to_string()));
    }

    let contents = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            ConfigError::NotFound {
                path: path.to_path_buf(),
                source,
            }
        } else {
            ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    parse_document(&contents, path)
}

pub(crate) fn parse_document(contents: &str, path: &Path) -> Result<ConfigBox, ConfigError> {
    let empty = || ConfigError::Empty {
        path: path.to_path_buf(),
    };

    if is_blank_document(contents) {
        return Err(empty());
    }

    let value: Value = serde_yaml::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    match value {
        Value::Null => Err(empty()),
        Value::Mapping(mapping) => Ok(ConfigBox::from(mapping)),
        other => Err(ConfigError::NotAMapping {
            key: path.display().to_string(),
            found: kind_of(&other),
        }),
    }
}

/// True when the text has nothing but whitespace, comments and document markers.
fn is_blank_document(contents: &str) -> bool {
    contents.lines().map(str::trim).all(|line| {
        line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
    })
}

/// Where to look for the configuration when no path is given.
///
/// 1. `FLOWERS_CONFIG`
/// 2. `config/config.yaml` under the working directory, if it exists
/// 3. `<platform config dir>/flowers/config.yaml`, if it exists
/// 4. `config/config.yaml`
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = env::var(CONFIG_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return local;
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join("flowers").join("config.yaml");
        if user.exists() {
            return user;
        }
    }

    local
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_detection() {
        assert!(is_blank_document(""));
        assert!(is_blank_document("   \n\t\n"));
        assert!(is_blank_document("# only a comment\n---\n  # another\n"));
        assert!(!is_blank_document("a: 1"));
    }

    #[test]
    fn test_null_document_is_empty() {
        let err = parse_document("~\n", Path::new("null.yaml")).unwrap_err();
        assert!(err.is_empty());
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        let err = parse_document("just a string\n", Path::new("scalar.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::NotAMapping { found: "a string", .. }));
    }

    #[test]
    fn test_empty_flow_mapping_is_valid() {
        let cfg = parse_document("{}\n", Path::new("empty-map.yaml")).unwrap();
        assert!(cfg.is_empty());
    }

    #[test]
    fn test_default_config_path_resolution() {
        // Unit tests run from the package root, where config/config.yaml ships.
        env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(default_config_path(), PathBuf::from("config/config.yaml"));

        env::set_var(CONFIG_ENV_VAR, "");
        assert_eq!(default_config_path(), PathBuf::from("config/config.yaml"));

        env::set_var(CONFIG_ENV_VAR, "/tmp/flowers-test/custom.yaml");
        let path = default_config_path();
        env::remove_var(CONFIG_ENV_VAR);
        assert_eq!(path, PathBuf::from("/tmp/flowers-test/custom.yaml"));
    }
}
