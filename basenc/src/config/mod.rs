use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context as _, Result};
use basencoding::{BaseSpec, TextEncoding};
use serde::Deserialize;

pub mod setup;

/// Name of the optional config file in the working directory.
pub const DEFAULT_FILE: &str = "basenc.toml";

/// Prefix of environment variables that override the config.
pub const ENV_PREFIX: &str = "BASENC_";

#[derive(Debug, Deserialize)]
pub struct BConfig {
    pub codec: BCodecConfig,
    #[serde(default)]
    pub log: BLogConfig,
}

#[derive(Debug, Deserialize)]
pub struct BCodecConfig {
    pub encoding: String,
    pub base: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
pub struct BLogConfig {
    pub default: Option<log::LevelFilter>,
    pub pattern: Option<String>,
    #[serde(flatten)]
    pub modules: HashMap<String, log::LevelFilter>,
}

impl BConfig {
    /// Loads the layered configuration.
    ///
    /// If `file` is [`None`], [`DEFAULT_FILE`] is loaded if it exists.
    /// Otherwise `file` must exist.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        use setup::{Builder, Env, File, TomlText};

        let default_config = include_str!("../../assets/default_config.toml");
        let file = match file {
            Some(path) => File::new(path),
            None => File::new(DEFAULT_FILE).required(false),
        };

        Builder::new()
            .add_layer(TomlText::new(default_config))
            .add_layer(file)
            .add_layer(Env::prefixed(ENV_PREFIX))
            .build()
    }
}

impl BCodecConfig {
    pub fn encoding(&self) -> Result<TextEncoding> {
        self.encoding
            .parse()
            .with_context(|| format!("invalid `codec.encoding` in config: {:?}", self.encoding))
    }

    pub fn base(&self) -> Result<BaseSpec> {
        let Some(base) = &self.base else {
            return Ok(BaseSpec::Absent);
        };

        // checked here so a bad default fails even when `--base` isn't used
        base.parse::<BaseSpec>()
            .and_then(|spec| spec.resolve_fixed().map(|_| spec))
            .with_context(|| format!("invalid `codec.base` in config: {base:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::setup::{Builder, TomlText};
    use super::*;

    fn from_text(text: &str) -> BConfig {
        Builder::new()
            .add_layer(TomlText::new(include_str!("../../assets/default_config.toml")))
            .add_layer(TomlText::new(text))
            .build()
            .expect("config is valid")
    }

    #[test]
    fn defaults() {
        let config = from_text("");

        assert_eq!(config.codec.encoding().ok(), Some(TextEncoding::Utf8));
        assert_eq!(config.codec.base().ok(), Some(BaseSpec::Absent));
        assert_eq!(config.log.default, Some(log::LevelFilter::Warn));
        assert!(config.log.pattern.is_some(), "default pattern");
        assert!(config.log.modules.is_empty(), "no module overrides");
    }

    #[test]
    fn overrides() {
        let config = from_text(
            r#"
            [codec]
            encoding = "ascii"
            base = "G"

            [log]
            default = "info"
            basencoding = "trace"
            "#,
        );

        assert_eq!(config.codec.encoding().ok(), Some(TextEncoding::Ascii));
        assert_eq!(config.codec.base().ok(), Some(BaseSpec::Char(b'G')));
        assert_eq!(config.log.default, Some(log::LevelFilter::Info));
        assert_eq!(
            config.log.modules.get("basencoding"),
            Some(&log::LevelFilter::Trace)
        );
    }

    #[test]
    fn invalid_values_fail_late() {
        let config = from_text("codec = { encoding = 'klingon', base = '99' }");

        assert!(config.codec.encoding().is_err(), "unknown encoding");
        assert!(config.codec.base().is_err(), "base out of range");
    }
}
