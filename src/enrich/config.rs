use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use alder::resolve::SelectionPolicy;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub overpass: OverpassConfig,
    pub resolver: ResolverConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct InputConfig {
    pub points: PathBuf,
    pub exclusions: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub results: PathBuf,
    #[serde(default = "default_diagnostics_dir")]
    pub diagnostics_dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OverpassConfig {
    pub endpoint: String,
    /// Pause after every point, independent of retry backoff.
    #[serde(default = "default_pause_secs")]
    pub pause_secs: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ResolverConfig {
    pub policy: SelectionPolicy,
    pub boundary_url: Option<String>,
}

fn default_diagnostics_dir() -> PathBuf {
    PathBuf::from("diagnostics")
}

fn default_pause_secs() -> f64 {
    1.5
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
