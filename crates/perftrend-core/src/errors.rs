use std::path::{Path, PathBuf};

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// No database file yet; the harness has not recorded any runs.
    #[error("performance database not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("cannot open performance database {}: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("record limit must be positive")]
    InvalidLimit,

    #[error("query failed: {0}")]
    Query(#[from] rusqlite::Error),
}

impl StoreError {
    pub fn unavailable(path: impl AsRef<Path>, source: rusqlite::Error) -> Self {
        Self::Unavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid axis range {lo}..{hi}")]
    AxisRange { lo: f64, hi: f64 },

    #[error("test {0} is not in the catalog")]
    UnknownTest(u32),

    #[error("plot render error: {0}")]
    Plot(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl<E> From<DrawingAreaErrorKind<E>> for RenderError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(value: DrawingAreaErrorKind<E>) -> Self {
        Self::Plot(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("unsupported config version {found} (supported: {supported})")]
    Version { found: u32, supported: u32 },

    #[error("invalid config: {0}")]
    Invalid(String),
}
