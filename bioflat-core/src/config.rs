use std::fs::read_to_string;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default number of sequence characters per FASTA line.
pub const DEFAULT_FASTA_LINE_WIDTH: usize = 80;

/// Default number of decimals used for QUAL and score columns.
pub const DEFAULT_FLOAT_PRECISION: usize = 6;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("FASTA line width must be greater than zero")]
    InvalidLineWidth,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// How the line decoders react to a malformed data line.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct ReaderConfig {
    /// Abort on the first malformed line instead of skipping it.
    pub strict: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct WriterConfig {
    pub fasta_line_width: usize,
    pub float_precision: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            fasta_line_width: DEFAULT_FASTA_LINE_WIDTH,
            float_precision: DEFAULT_FLOAT_PRECISION,
        }
    }
}

/// Flank sizes used when cutting sequence windows around features.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct WindowConfig {
    pub left_flank: usize,
    pub right_flank: usize,
}

///
/// Top level bioflat configuration, usually read from a TOML file:
///
/// ```toml
/// [reader]
/// strict = false
///
/// [writer]
/// fasta_line_width = 80
/// float_precision = 6
///
/// [window]
/// left_flank = 100
/// right_flank = 100
/// ```
///
/// Every table and field is optional.
///
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub reader: ReaderConfig,
    pub writer: WriterConfig,
    pub window: WindowConfig,
}

impl Config {
    pub fn from_toml_str(toml_str: &str) -> ConfigResult<Self> {
        let config: Config = toml::from_str(toml_str)?;
        if config.writer.fasta_line_width == 0 {
            return Err(ConfigError::InvalidLineWidth);
        }
        Ok(config)
    }
}

impl TryFrom<&Path> for Config {
    type Error = ConfigError;

    fn try_from(path: &Path) -> Result<Self, Self::Error> {
        let toml_str = read_to_string(path)?;
        Config::from_toml_str(&toml_str)
    }
}
