//! TOML configuration loading and validation.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tickdash::Instrument;
use tickdash::scoreboard::SCOREBOARD_WARMUP_ROWS;

use crate::error::{Error, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    #[serde(default)]
    pub derive: DeriveConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DataConfig {
    /// Directory holding one folder per round
    pub path: PathBuf,
    /// Team whose exposure is charted
    #[serde(default)]
    pub trader_name: String,
    /// Treat `path` itself as the only round
    #[serde(default)]
    pub dev_mode: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeriveConfig {
    /// Instrument the book and tick datasets are filtered to
    #[serde(default = "default_instrument")]
    pub instrument: String,
    /// Leading scoreboard rows to drop
    #[serde(default = "default_warmup")]
    pub warmup_rows: usize,
}

impl Default for DeriveConfig {
    fn default() -> Self {
        Self {
            instrument: default_instrument(),
            warmup_rows: default_warmup(),
        }
    }
}

fn default_instrument() -> String {
    "ETF".into()
}
fn default_warmup() -> usize {
    SCOREBOARD_WARMUP_ROWS
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./dashboard_out")
}

impl Config {
    /// Load config from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::ConfigRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate config invariants.
    pub fn validate(&self) -> Result<()> {
        if self.data.path.as_os_str().is_empty() {
            return Err(Error::Config("data path must not be empty".into()));
        }
        self.instrument()?;
        Ok(())
    }

    /// The configured instrument filter.
    pub fn instrument(&self) -> Result<Instrument> {
        self.derive
            .instrument
            .parse()
            .map_err(|e: tickdash::UnknownInstrument| Error::Config(e.to_string()))
    }

    /// Output directory for one tab.
    pub fn output_dir(&self, tab: &str) -> PathBuf {
        let name = if tab == "." { "dev" } else { tab };
        self.output.dir.join(name)
    }
}
