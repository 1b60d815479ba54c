use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::ValueEnum;
use serde::Deserialize;
use sortbench_core::LimitOverride;
use sortbench_core::dataset::DEFAULT_SIZES;
use sortbench_core::perf::driver::DEFAULT_REPEAT;

/// Picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "sortbench.toml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    #[default]
    Table,
    Json,
    Csv,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Table => "txt",
            ReportFormat::Json => "json",
            ReportFormat::Csv => "csv",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Reports go to stdout when unset.
    pub dir: Option<PathBuf>,
    pub format: ReportFormat,
}

/// Contents of `sortbench.toml`. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub sizes: Vec<usize>,
    pub repeat: usize,
    pub scenarios: Vec<String>,
    pub candidates: Vec<String>,
    pub limits: Vec<LimitOverride>,
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_SIZES.to_vec(),
            repeat: DEFAULT_REPEAT,
            scenarios: Vec::new(),
            candidates: Vec::new(),
            limits: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    pub fn from_toml_str(src: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(src)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let src = std::fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
        Self::from_toml_str(&src).with_context(|| format!("parse config {}", path.display()))
    }

    /// Explicit path, else `sortbench.toml` in the working directory, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.is_file() {
            tracing::debug!(target: "sortbench::cli", path = DEFAULT_CONFIG_FILE, "using config from working directory");
            return Self::load(fallback);
        }
        Ok(Self::default())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sizes.is_empty() {
            anyhow::bail!("at least one dataset size is required");
        }
        if self.sizes.contains(&0) {
            anyhow::bail!("dataset sizes must be positive");
        }
        if self.repeat == 0 {
            anyhow::bail!("repeat must be at least 1");
        }
        Ok(())
    }
}
