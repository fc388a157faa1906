//! Logging initialization
//!
//! Terminal logger always, plus a file logger when `LOG_FILE_PATH` is set.

use anyhow::Result;
use simplelog::*;
use std::fs::OpenOptions;

/// Parses a `LOG_LEVEL` value, falling back to `Info` for anything unknown.
pub fn parse_level(raw: &str) -> LevelFilter {
    match raw.trim().to_ascii_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" | "warning" => LevelFilter::Warn,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

/// Initialize logger for console and optional file output
///
/// # Arguments
/// * `level` - Raw level string (usually from `LOG_LEVEL`)
/// * `log_file_path` - Optional path; the file is opened in append mode
pub fn init_logger(level: &str, log_file_path: Option<&str>) -> Result<()> {
    let level = parse_level(level);
    let config = ConfigBuilder::new()
        .add_filter_ignore_str("hyper")
        .add_filter_ignore_str("reqwest")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        level,
        config.clone(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )];

    if let Some(path) = log_file_path {
        let log_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| anyhow::anyhow!("Failed to open log file {}: {}", path, e))?;
        loggers.push(WriteLogger::new(level, config, log_file));
    }

    CombinedLogger::init(loggers).map_err(|e| anyhow::anyhow!("Failed to initialize logger: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::tempdir;

    #[test]
    fn parses_levels() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("warning"), LevelFilter::Warn);
        assert_eq!(parse_level("nonsense"), LevelFilter::Info);
    }

    #[test]
    fn creates_log_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bot.log");
        assert!(!path.exists());

        // Opened before the global logger is installed
        let _ = init_logger("info", path.to_str());
        assert!(path.is_file());
    }

    #[test]
    fn unopenable_log_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("bot.log");

        let err = init_logger("info", path.to_str()).unwrap_err();
        assert!(err.to_string().starts_with("Failed to open log file"));
        assert!(!path.exists());
    }
}
