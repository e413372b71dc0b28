use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::config::ConfigBox;
use crate::logging::Logger;

/// Config key naming the root directory for generated artifacts.
pub const ARTIFACTS_ROOT_KEY: &str = "artifacts_root";

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("Invalid directory path at position {index}: path is empty")]
    InvalidPath { index: usize },
    #[error("Error creating directory '{}': {source}", path.display())]
    Os {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DirectoryError {
    /// The underlying OS error, when creation itself failed.
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            Self::Os { source, .. } => Some(source),
            Self::InvalidPath { .. } => None,
        }
    }
}

/// Creates every directory in `paths`, parents included, in order.
///
/// Directories that already exist are left alone, so calling this twice with
/// the same list succeeds both times. Processing stops at the first failure;
/// directories created before it stay on disk.
///
/// ```no_run
/// use flowers::{create_directories, LogFacade};
///
/// create_directories(&["artifacts/models", "artifacts/logs"], true, &LogFacade)?;
/// # Ok::<(), flowers::DirectoryError>(())
/// ```
pub fn create_directories<P: AsRef<Path>>(
    paths: &[P],
    verbose: bool,
    logger: &dyn Logger,
) -> Result<(), DirectoryError> {
    for (index, path) in paths.iter().enumerate() {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            let err = DirectoryError::InvalidPath { index };
            logger.error(&err.to_string());
            return Err(err);
        }

        if let Err(source) = fs::create_dir_all(path) {
            let err = DirectoryError::Os {
                path: path.to_path_buf(),
                source,
            };
            logger.error(&err.to_string());
            return Err(err);
        }

        if verbose {
            logger.info(&format!("Created directory at: {}", path.display()));
        }
    }
    Ok(())
}

/// Quiet single-directory variant of [`create_directories`].
pub fn ensure_directory<P: AsRef<Path>>(path: P, logger: &dyn Logger) -> Result<(), DirectoryError> {
    create_directories(&[path.as_ref()], false, logger)
}

/// Directories a run should prepare: the config's `artifacts_root` first,
/// when it is a string, followed by `extra` in the given order.
pub fn directories_to_create(config: &ConfigBox, extra: &[PathBuf]) -> Vec<PathBuf> {
    config
        .get(ARTIFACTS_ROOT_KEY)
        .and_then(|v| v.as_str())
        .map(PathBuf::from)
        .into_iter()
        .chain(extra.iter().cloned())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::MemoryLogger;
    use log::Level;

    #[test]
    fn test_creates_nested_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b").join("c");
        let logger = MemoryLogger::new();

        create_directories(&[&nested], true, &logger).unwrap();

        assert!(nested.is_dir());
        assert_eq!(logger.messages_at(Level::Info).len(), 1);
    }

    #[test]
    fn test_quiet_mode_logs_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = MemoryLogger::new();

        create_directories(&[tmp.path().join("x")], false, &logger).unwrap();

        assert!(logger.records().is_empty());
    }

    #[test]
    fn test_empty_path_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = MemoryLogger::new();
        let paths = vec![tmp.path().join("ok"), PathBuf::new()];

        let err = create_directories(&paths, true, &logger).unwrap_err();

        assert!(matches!(err, DirectoryError::InvalidPath { index: 1 }));
        assert!(err.io_error().is_none());
        assert!(tmp.path().join("ok").is_dir());
        assert_eq!(logger.messages_at(Level::Error).len(), 1);
    }

    #[test]
    fn test_artifacts_root_comes_first() {
        let cfg = ConfigBox::from_yaml_str("artifacts_root: artifacts\n").unwrap();
        let extra = vec![PathBuf::from("artifacts/models"), PathBuf::from("logs")];

        assert_eq!(
            directories_to_create(&cfg, &extra),
            vec![
                PathBuf::from("artifacts"),
                PathBuf::from("artifacts/models"),
                PathBuf::from("logs"),
            ]
        );
    }

    #[test]
    fn test_non_string_artifacts_root_is_ignored() {
        let cfg = ConfigBox::from_yaml_str("artifacts_root: [a, b]\nmodel: {}\n").unwrap();
        let extra = vec![PathBuf::from("logs")];

        assert_eq!(directories_to_create(&cfg, &extra), extra);

        let bare = ConfigBox::from_yaml_str("model: {}\n").unwrap();
        assert!(directories_to_create(&bare, &[]).is_empty());
    }

    #[test]
    fn test_ensure_directory_is_quiet() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = MemoryLogger::new();

        ensure_directory(tmp.path().join("logs"), &logger).unwrap();

        assert!(tmp.path().join("logs").is_dir());
        assert!(logger.records().is_empty());
    }
}
