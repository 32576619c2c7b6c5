#![deny(missing_docs)]
//! Shared logging setup for the newshound workspace.
//!
//! All crates log through the `log` facade; this crate owns the single
//! place where a `simplelog` backend is installed, plus a minimal
//! initializer for tests.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Where log output ends up.
pub enum LogDestination<'a> {
    /// Write to the given log file.
    File(&'a Path),
    /// Write to the terminal (stderr/stdout via simplelog).
    Terminal,
    /// Write to both the file and the terminal.
    Both(&'a Path),
}

/// Initialize the global logger with the specified destination.
///
/// Safe to call more than once; later calls are ignored if a logger is
/// already installed. A file destination that cannot be created degrades
/// to no file logger with a note on stderr.
pub fn initialize(destination: LogDestination<'_>) {
    let level = LevelFilter::Info;
    let config = build_config();

    let loggers: Vec<Box<dyn SharedLogger>> = match destination {
        LogDestination::File(path) => match create_file_logger(level, config, path) {
            Some(file_logger) => vec![file_logger],
            None => return,
        },
        LogDestination::Terminal => {
            vec![term_logger(level, config)]
        }
        LogDestination::Both(path) => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![term_logger(level, config.clone())];
            if let Some(file_logger) = create_file_logger(level, config, path) {
                loggers.push(file_logger);
            }
            loggers
        }
    };

    let _ = CombinedLogger::init(loggers);
}

/// Installs a terminal logger for test binaries.
///
/// Calling it from several tests is fine; only the first installation
/// sticks.
pub fn initialize_for_tests() {
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // An earlier test in the same binary may already have installed one.
    let _ = CombinedLogger::init(vec![term_logger(level, Config::default())]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn term_logger(level: LevelFilter, config: Config) -> Box<TermLogger> {
    TermLogger::new(level, config, TerminalMode::Mixed, ColorChoice::Auto)
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!("Warning: Could not create log file at {:?}: {}", path, err);
            None
        }
    }
}
