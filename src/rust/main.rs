use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use flowers::{
    create_directories, default_config_path, directories_to_create, init_logger, load_config,
    logging::parse_level, LogFacade, LogSettings,
};
use log::{debug, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// YAML configuration file (defaults to $FLOWERS_CONFIG or config/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Extra directory to create; may be repeated
    #[arg(short, long = "dir")]
    dirs: Vec<PathBuf>,

    /// Do not log each created directory
    #[arg(short, long)]
    quiet: bool,

    /// Print the loaded configuration as YAML
    #[arg(short, long)]
    print: bool,

    /// Log level: error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = LogSettings::default();
    if let Some(level) = &args.log_level {
        let level = parse_level(level).ok_or_else(|| anyhow!("unknown log level '{}'", level))?;
        settings = settings.with_level(level);
    }
    if let Some(path) = &args.log_file {
        settings = settings.with_log_file(path);
    }
    init_logger(&settings).context("failed to initialise logging")?;

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    debug!("Using config file {:?}", config_path);
    let config = load_config(&config_path, &LogFacade)?;

    let directories = directories_to_create(&config, &args.dirs);

    if !directories.is_empty() {
        create_directories(&directories, !args.quiet, &LogFacade)?;
        info!("{} directories ready", directories.len());
    }

    if args.print {
        print!("{}", config);
    }

    Ok(())
}
