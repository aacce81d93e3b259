//! Runtime configuration.
//!
//! Loaded from the YAML file named by `CREST_CONFIG` when set, otherwise every
//! field takes its default. `LISTEN` and `CREST_ROUTES` override the listen
//! address and the route file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;

use crate::http::buffer::{
    BufferLimits, DEFAULT_HIGH_WATERMARK, DEFAULT_LOW_WATERMARK, DEFAULT_MAX_HEAD_LENGTH,
    DEFAULT_MAX_LINE_LENGTH,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub parser: ParserConfig,
    pub routes: RoutesConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
    /// Seconds allowed for reading one request head; 0 disables the limit.
    pub read_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            read_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_secs > 0).then(|| Duration::from_secs(self.read_timeout_secs))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    pub max_line_length: usize,
    pub max_head_length: usize,
    pub high_watermark: usize,
    pub low_watermark: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
            max_head_length: DEFAULT_MAX_HEAD_LENGTH,
            high_watermark: DEFAULT_HIGH_WATERMARK,
            low_watermark: DEFAULT_LOW_WATERMARK,
        }
    }
}

impl ParserConfig {
    pub fn limits(&self) -> BufferLimits {
        BufferLimits {
            max_line_length: self.max_line_length,
            max_head_length: self.max_head_length,
            high_watermark: self.high_watermark,
            low_watermark: self.low_watermark,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    pub file: PathBuf,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("routes.txt"),
        }
    }
}

impl Config {
    /// Loads the configuration from the environment.
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("CREST_CONFIG") {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.server.listen_addr = addr;
        }
        if let Ok(file) = std::env::var("CREST_ROUTES") {
            cfg.routes.file = PathBuf::from(file);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn from_yaml(text: &str) -> anyhow::Result<Self> {
        let cfg: Self = serde_yaml::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let parser = &self.parser;
        if parser.max_line_length == 0 {
            anyhow::bail!("parser.max_line_length must be greater than zero");
        }
        if parser.max_head_length < parser.max_line_length {
            anyhow::bail!(
                "parser.max_head_length ({}) is smaller than parser.max_line_length ({})",
                parser.max_head_length,
                parser.max_line_length
            );
        }
        if parser.high_watermark == 0 {
            anyhow::bail!("parser.high_watermark must be greater than zero");
        }
        if parser.low_watermark > parser.high_watermark {
            anyhow::bail!(
                "parser.low_watermark ({}) exceeds parser.high_watermark ({})",
                parser.low_watermark,
                parser.high_watermark
            );
        }
        Ok(())
    }
}
