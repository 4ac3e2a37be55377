//! Logger setup: stderr always, plus an optional log file.

use std::fs::File;
use std::path::Path;

use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger};

use crate::error::CliError;

/// Level for a `-v` count; `base` applies when no flag is given.
pub fn level_for(verbose: u8, base: LevelFilter) -> LevelFilter {
    match verbose {
        0 => base,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init(level: LevelFilter, log_file: Option<&Path>) -> Result<(), CliError> {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file {
        let file = File::create(path).map_err(|e| CliError::io(path, e))?;
        loggers.push(WriteLogger::new(LevelFilter::Debug.max(level), Config::default(), file));
    }

    CombinedLogger::init(loggers).map_err(|e| CliError::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, LevelFilter::Warn), LevelFilter::Warn);
        assert_eq!(level_for(1, LevelFilter::Warn), LevelFilter::Info);
        assert_eq!(level_for(2, LevelFilter::Error), LevelFilter::Debug);
        assert_eq!(level_for(9, LevelFilter::Warn), LevelFilter::Trace);
    }
}
