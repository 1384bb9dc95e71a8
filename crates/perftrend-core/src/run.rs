//! End-to-end driver: read the store, aggregate, render the chart plan.

use std::path::PathBuf;

use anyhow::Context;

use crate::aggregate::organize;
use crate::catalog::TestCatalog;
use crate::config::PerfTrendConfig;
use crate::errors::StoreError;
use crate::model::AggregatedSeries;
use crate::plan::{ChartPlan, PlanReport};
use crate::render::MIN_COMMITS;
use crate::store::ResultStore;

#[derive(Debug)]
pub enum RunOutcome {
    /// No database file yet.
    NoStore { path: PathBuf },
    /// The file exists but could not be opened as a database.
    StoreUnavailable { path: PathBuf, reason: String },
    /// Opened, but no results with a commit recorded.
    NoData,
    /// Fewer complete commits than a trend needs.
    InsufficientData { commits: usize },
    /// The chart plan ran; individual charts may still have failed.
    Completed(PlanReport),
}

/// Outcome of reading and aggregating, before any rendering.
#[derive(Debug)]
pub enum SeriesRead {
    NoStore { path: PathBuf },
    StoreUnavailable { path: PathBuf, reason: String },
    NoData,
    Loaded { records: usize, series: AggregatedSeries },
}

enum Opened {
    Ready(ResultStore),
    NoStore(PathBuf),
    Unavailable(PathBuf, String),
}

fn open_store(cfg: &PerfTrendConfig) -> anyhow::Result<Opened> {
    match ResultStore::open(&cfg.database) {
        Ok(store) => {
            tracing::info!(path = %cfg.database.display(), "connected to database");
            Ok(Opened::Ready(store))
        }
        Err(StoreError::NotFound { path }) => {
            tracing::warn!(
                path = %path.display(),
                "database not found; performance tests must be run first"
            );
            Ok(Opened::NoStore(path))
        }
        Err(StoreError::Unavailable { path, source }) => {
            tracing::error!(path = %path.display(), "error connecting to database: {source}");
            Ok(Opened::Unavailable(path, source.to_string()))
        }
        Err(e) => Err(e).context("opening performance database"),
    }
}

/// `None` when the store holds no usable rows.
fn load(
    store: &ResultStore,
    cfg: &PerfTrendConfig,
    catalog: &TestCatalog,
) -> anyhow::Result<Option<(usize, AggregatedSeries)>> {
    let desired = u32::try_from(cfg.max_commits).unwrap_or(u32::MAX);
    let records = store
        .fetch_for_commits(desired, catalog)
        .with_context(|| format!("reading results from {}", store.path().display()))?;
    if records.is_empty() {
        tracing::warn!("no data found in database");
        return Ok(None);
    }
    tracing::info!(records = records.len(), "found result records");

    let series = organize(&records, catalog, cfg.max_commits);
    tracing::info!(
        commits = series.len(),
        "found data for commits with complete results"
    );
    Ok(Some((records.len(), series)))
}

/// Read and aggregate without rendering.
pub fn read_series(cfg: &PerfTrendConfig, catalog: &TestCatalog) -> anyhow::Result<SeriesRead> {
    let store = match open_store(cfg)? {
        Opened::Ready(store) => store,
        Opened::NoStore(path) => return Ok(SeriesRead::NoStore { path }),
        Opened::Unavailable(path, reason) => {
            return Ok(SeriesRead::StoreUnavailable { path, reason })
        }
    };
    let read = match load(&store, cfg, catalog)? {
        Some((records, series)) => SeriesRead::Loaded { records, series },
        None => SeriesRead::NoData,
    };
    store.close();
    Ok(read)
}

/// Full pipeline. The store stays open for the whole run and is released on
/// every return path.
pub fn generate_charts(
    cfg: &PerfTrendConfig,
    catalog: &TestCatalog,
) -> anyhow::Result<RunOutcome> {
    let store = match open_store(cfg)? {
        Opened::Ready(store) => store,
        Opened::NoStore(path) => return Ok(RunOutcome::NoStore { path }),
        Opened::Unavailable(path, reason) => {
            return Ok(RunOutcome::StoreUnavailable { path, reason })
        }
    };

    let Some((_, series)) = load(&store, cfg, catalog)? else {
        return Ok(RunOutcome::NoData);
    };

    if series.len() < MIN_COMMITS {
        tracing::warn!(
            commits = series.len(),
            "need at least {MIN_COMMITS} commits with complete data to generate charts"
        );
        return Ok(RunOutcome::InsufficientData {
            commits: series.len(),
        });
    }

    let plan = ChartPlan::standard(catalog, &cfg.docs_dir, &cfg.suite_dir, cfg.chart_sizes());
    let report = plan.execute(&series, catalog);
    if report.success() {
        tracing::info!(charts = report.rendered(), "all charts updated successfully");
    } else {
        tracing::error!(
            failed = report.failed(),
            rendered = report.rendered(),
            "some charts failed to generate"
        );
    }

    store.close();
    Ok(RunOutcome::Completed(report))
}
