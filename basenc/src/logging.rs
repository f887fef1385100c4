//! Sets up [`log4rs`] to write to stderr.
//!
//! stdout carries the converted data, so nothing else may be written there.

use anyhow::Result;
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;

use crate::config::BLogConfig;

const APPENDER: &str = "stderr";
const DEFAULT_PATTERN: &str = "{h({l:<5})} {t} - {m}{n}";

/// Builds the logger configuration.
///
/// Each `verbose` step raises the root level by one, but never lowers it.
pub fn build_config(config: &BLogConfig, verbose: u8) -> Result<Config> {
    let pattern = config.pattern.as_deref().unwrap_or(DEFAULT_PATTERN);
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let root = config.default.unwrap_or(LevelFilter::Warn).max(verbose_level(verbose));
    let loggers = config
        .modules
        .iter()
        .map(|(name, &level)| Logger::builder().build(name, level));

    let config = Config::builder()
        .appender(Appender::builder().build(APPENDER, Box::new(stderr)))
        .loggers(loggers)
        .build(Root::builder().appender(APPENDER).build(root))?;

    Ok(config)
}

/// Initializes the global logger.
pub fn init(config: &BLogConfig, verbose: u8) -> Result<()> {
    log4rs::init_config(build_config(config, verbose)?)?;
    Ok(())
}

fn verbose_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Off,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn log_config(default: Option<LevelFilter>) -> BLogConfig {
        BLogConfig {
            default,
            pattern: None,
            modules: HashMap::from([("basencoding".to_owned(), LevelFilter::Trace)]),
        }
    }

    #[test]
    fn verbosity_raises_root() {
        let cases = [
            (None, 0, LevelFilter::Warn),
            (None, 1, LevelFilter::Info),
            (Some(LevelFilter::Error), 2, LevelFilter::Debug),
            (Some(LevelFilter::Debug), 1, LevelFilter::Debug),
            (Some(LevelFilter::Off), 5, LevelFilter::Trace),
        ];

        for (default, verbose, expected) in cases {
            let config = build_config(&log_config(default), verbose).expect("config is valid");
            assert_eq!(config.root().level(), expected, "{default:?} + {verbose}");
        }
    }

    #[test]
    fn module_levels_are_kept() {
        let config = build_config(&log_config(None), 0).expect("config is valid");
        let loggers = config.loggers();

        assert_eq!(loggers.len(), 1);
        assert_eq!(loggers[0].name(), "basencoding");
        assert_eq!(loggers[0].level(), LevelFilter::Trace);
    }
}
