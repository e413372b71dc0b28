use std::env;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use env_logger::{Builder, Target};
use log::{Level, LevelFilter};

use crate::directories::ensure_directory;

/// Environment variable consulted for the log level when none is given explicitly.
pub const LOG_ENV_VAR: &str = "FLOWERS_LOG";

const LOG_TARGET: &str = "flowers";

/// Minimal logging capability handed to the loaders.
///
/// Components take a `&dyn Logger` instead of reaching for the global logger,
/// so tests can swap in a [`MemoryLogger`] and inspect what was reported.
pub trait Logger {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Forwards to the process-wide `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn info(&self, message: &str) {
        log::info!(target: LOG_TARGET, "{}", message);
    }

    fn error(&self, message: &str) {
        log::error!(target: LOG_TARGET, "{}", message);
    }
}

/// Records every message in memory. Handy as a stand-in during tests.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything logged so far, oldest first.
    pub fn records(&self) -> Vec<(Level, String)> {
        self.lock().clone()
    }

    pub fn messages_at(&self, level: Level) -> Vec<String> {
        self.lock()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    fn push(&self, level: Level, message: &str) {
        self.lock().push((level, message.to_string()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(Level, String)>> {
        // A poisoned recorder still holds valid entries.
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Logger for MemoryLogger {
    fn info(&self, message: &str) {
        self.push(Level::Info, message);
    }

    fn error(&self, message: &str) {
        self.push(Level::Error, message);
    }
}

/// How the global `env_logger` backend should be set up.
#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    /// Explicit level; falls back to `FLOWERS_LOG`, then `info`.
    pub level: Option<LevelFilter>,
    /// Append log lines to this file instead of stderr.
    pub log_file: Option<PathBuf>,
}

impl LogSettings {
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = Some(level);
        self
    }

    pub fn with_log_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.log_file = Some(path.as_ref().to_path_buf());
        self
    }

    fn resolve_level(&self) -> LevelFilter {
        self.level
            .or_else(|| env::var(LOG_ENV_VAR).ok().and_then(|s| parse_level(&s)))
            .unwrap_or(LevelFilter::Info)
    }
}

/// Parses a level name such as `"debug"` or `"WARNING"`.
pub fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Installs the global logger.
///
/// Calling this more than once is harmless; later calls leave the first
/// logger in place.
pub fn init_logger(settings: &LogSettings) -> io::Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(settings.resolve_level())
        .format(|buf, record| {
            writeln!(
                buf,
                "[{}: {}: {}: {}]",
                buf.timestamp(),
                record.level(),
                record.module_path().unwrap_or_else(|| record.target()),
                record.args()
            )
        });

    if let Some(path) = &settings.log_file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            ensure_directory(parent, &LogFacade).map_err(|e| match e {
                crate::DirectoryError::Os { source, .. } => source,
                other => io::Error::new(io::ErrorKind::InvalidInput, other.to_string()),
            })?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    let _ = builder.try_init();
    Ok(())
}
