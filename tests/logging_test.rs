use std::fs;

use flowers::{init_logger, LogSettings};
use log::LevelFilter;

// Only one test in this binary installs the global logger.
#[test]
fn test_log_file_target_and_repeat_init() -> Result<(), Box<dyn std::error::Error>> {
    let tmp = tempfile::tempdir()?;
    let log_file = tmp.path().join("nested").join("logs").join("run.log");
    let settings = LogSettings::default()
        .with_level(LevelFilter::Info)
        .with_log_file(&log_file);

    init_logger(&settings)?;
    assert!(log_file.parent().unwrap().is_dir());

    log::info!("hello from test");
    log::debug!("below the threshold");

    let contents = fs::read_to_string(&log_file)?;
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with('['));
    assert!(lines[0].ends_with(": INFO: logging_test: hello from test]"));

    // A second call succeeds but keeps the first logger in place.
    let other_file = tmp.path().join("other.log");
    init_logger(&LogSettings::default().with_log_file(&other_file))?;
    log::error!("after second init");

    let contents = fs::read_to_string(&log_file)?;
    assert_eq!(contents.lines().count(), 2);
    assert!(contents.contains(": ERROR: logging_test: after second init]"));
    assert_eq!(fs::read_to_string(&other_file)?, "");
    Ok(())
}
