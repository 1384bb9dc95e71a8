use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::aggregate::DEFAULT_MAX_COMMITS;
use crate::errors::ConfigError;
use crate::plan::ChartSizes;
use crate::render::{DEFAULT_OVERVIEW_SIZE, DEFAULT_TREND_SIZE};

pub const SUPPORTED_CONFIG_VERSION: u32 = 1;

/// Chart generation settings. Relative paths resolve against the repository
/// root given at run time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PerfTrendConfig {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default = "default_database")]
    pub database: PathBuf,
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,
    #[serde(default = "default_suite_dir")]
    pub suite_dir: PathBuf,
    #[serde(default = "default_max_commits")]
    pub max_commits: usize,
    #[serde(default = "default_overview_size")]
    pub overview_size: (u32, u32),
    #[serde(default = "default_trend_size")]
    pub trend_size: (u32, u32),
}

fn default_version() -> u32 {
    SUPPORTED_CONFIG_VERSION
}

fn default_database() -> PathBuf {
    PathBuf::from("tests/PerformanceTests/Database/performance.db")
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from("doc")
}

fn default_suite_dir() -> PathBuf {
    PathBuf::from("tests/PerformanceTests")
}

fn default_max_commits() -> usize {
    DEFAULT_MAX_COMMITS
}

fn default_overview_size() -> (u32, u32) {
    DEFAULT_OVERVIEW_SIZE
}

fn default_trend_size() -> (u32, u32) {
    DEFAULT_TREND_SIZE
}

impl Default for PerfTrendConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            database: default_database(),
            docs_dir: default_docs_dir(),
            suite_dir: default_suite_dir(),
            max_commits: default_max_commits(),
            overview_size: default_overview_size(),
            trend_size: default_trend_size(),
        }
    }
}

impl PerfTrendConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_CONFIG_VERSION {
            return Err(ConfigError::Version {
                found: self.version,
                supported: SUPPORTED_CONFIG_VERSION,
            });
        }
        if self.max_commits == 0 {
            return Err(ConfigError::Invalid("max_commits must be positive".into()));
        }
        for (name, (w, h)) in [
            ("overview_size", self.overview_size),
            ("trend_size", self.trend_size),
        ] {
            if w == 0 || h == 0 {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be non-zero, got {w}x{h}"
                )));
            }
        }
        Ok(())
    }

    /// Copy with every relative path joined onto `root`.
    pub fn resolve(&self, root: &Path) -> Self {
        let join = |p: &Path| {
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                root.join(p)
            }
        };
        Self {
            database: join(&self.database),
            docs_dir: join(&self.docs_dir),
            suite_dir: join(&self.suite_dir),
            ..self.clone()
        }
    }

    pub fn chart_sizes(&self) -> ChartSizes {
        ChartSizes {
            overview: self.overview_size,
            trend: self.trend_size,
        }
    }
}

pub fn load_config(path: &Path) -> Result<PerfTrendConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&raw)
}

pub fn parse_config(raw: &str) -> Result<PerfTrendConfig, ConfigError> {
    let cfg: PerfTrendConfig = serde_yaml::from_str(raw)?;
    cfg.validate()?;
    Ok(cfg)
}
