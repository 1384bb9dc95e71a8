//! Which charts are produced, where, and how partial failures are tallied.

use std::path::{Path, PathBuf};

use crate::catalog::TestCatalog;
use crate::errors::RenderError;
use crate::model::AggregatedSeries;
use crate::render::{render_chart, ChartSpec, LegendStyle, RenderOutcome};

pub const CHART_EXTENSION: &str = "svg";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Repository documentation, linked from the main README.
    Docs,
    /// The performance test suite's own directory.
    Suite,
}

impl Destination {
    pub fn overview_stem(self) -> &'static str {
        match self {
            Destination::Docs => "perf_overview",
            Destination::Suite => "perf_comparison",
        }
    }

    pub fn overview_title(self) -> &'static str {
        match self {
            Destination::Docs => "Emulator Performance Across Recent Commits",
            Destination::Suite => "Performance Comparison Across All Tests",
        }
    }

    pub fn legend(self) -> LegendStyle {
        match self {
            Destination::Docs => LegendStyle::Short,
            Destination::Suite => LegendStyle::Flattened,
        }
    }

    pub fn trend_stem(self, test_id: u32, file_word: &str) -> String {
        match self {
            Destination::Docs => format!("perf_test{test_id}_{file_word}"),
            Destination::Suite => format!("perf_trend_{file_word}"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Destination::Docs => "docs",
            Destination::Suite => "suite",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartJob {
    pub destination: Destination,
    pub spec: ChartSpec,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSizes {
    pub overview: (u32, u32),
    pub trend: (u32, u32),
}

impl Default for ChartSizes {
    fn default() -> Self {
        Self {
            overview: crate::render::DEFAULT_OVERVIEW_SIZE,
            trend: crate::render::DEFAULT_TREND_SIZE,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartPlan {
    pub jobs: Vec<ChartJob>,
}

impl ChartPlan {
    /// Overview plus one trend per catalog test, for docs then suite.
    pub fn standard(
        catalog: &TestCatalog,
        docs_dir: &Path,
        suite_dir: &Path,
        sizes: ChartSizes,
    ) -> Self {
        let mut jobs = Vec::with_capacity(2 * (catalog.len() + 1));
        for (destination, dir) in [
            (Destination::Docs, docs_dir),
            (Destination::Suite, suite_dir),
        ] {
            jobs.push(ChartJob {
                destination,
                spec: ChartSpec::Overview {
                    title: destination.overview_title().to_string(),
                    legend: destination.legend(),
                    size: sizes.overview,
                },
                path: chart_path(dir, destination.overview_stem()),
            });
            for entry in catalog.entries() {
                let stem = destination.trend_stem(entry.id, &entry.file_word());
                jobs.push(ChartJob {
                    destination,
                    spec: ChartSpec::Trend {
                        test_id: entry.id,
                        size: sizes.trend,
                    },
                    path: chart_path(dir, &stem),
                });
            }
        }
        Self { jobs }
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Render every job in order. A failed chart is recorded and the rest
    /// still run.
    pub fn execute(&self, series: &AggregatedSeries, catalog: &TestCatalog) -> PlanReport {
        let mut report = PlanReport::default();
        let mut current: Option<Destination> = None;

        for job in &self.jobs {
            if current != Some(job.destination) {
                current = Some(job.destination);
                tracing::info!(destination = job.destination.label(), "generating charts");
            }
            let status = match run_job(job, series, catalog) {
                Ok(RenderOutcome::Rendered(path)) => {
                    tracing::info!("Created: {}", path.display());
                    ChartStatus::Rendered
                }
                Ok(RenderOutcome::InsufficientData { commits }) => {
                    ChartStatus::InsufficientData { commits }
                }
                Err(e) => {
                    tracing::error!(
                        path = %job.path.display(),
                        chart = job.spec.kind(),
                        "chart generation failed: {e}"
                    );
                    ChartStatus::Failed(e.to_string())
                }
            };
            report.charts.push(ChartResult {
                path: job.path.clone(),
                destination: job.destination,
                status,
            });
        }
        report
    }
}

fn chart_path(dir: &Path, stem: &str) -> PathBuf {
    dir.join(format!("{stem}.{CHART_EXTENSION}"))
}

fn run_job(
    job: &ChartJob,
    series: &AggregatedSeries,
    catalog: &TestCatalog,
) -> Result<RenderOutcome, RenderError> {
    if let Some(dir) = job.path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    render_chart(series, catalog, &job.spec, &job.path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartStatus {
    Rendered,
    InsufficientData { commits: usize },
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartResult {
    pub path: PathBuf,
    pub destination: Destination,
    pub status: ChartStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlanReport {
    pub charts: Vec<ChartResult>,
}

impl PlanReport {
    pub fn success(&self) -> bool {
        self.charts
            .iter()
            .all(|c| c.status == ChartStatus::Rendered)
    }

    pub fn rendered(&self) -> usize {
        self.charts
            .iter()
            .filter(|c| c.status == ChartStatus::Rendered)
            .count()
    }

    pub fn failed(&self) -> usize {
        self.charts.len() - self.rendered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::REFERENCE_CATALOG;
    use crate::model::CommitFrame;

    fn names(plan: &ChartPlan) -> Vec<String> {
        plan.jobs
            .iter()
            .map(|j| j.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn standard_plan_covers_both_destinations() {
        let plan = ChartPlan::standard(
            &REFERENCE_CATALOG,
            Path::new("doc"),
            Path::new("tests/PerformanceTests"),
            ChartSizes::default(),
        );
        assert_eq!(plan.len(), 12);
        assert_eq!(
            names(&plan),
            vec![
                "perf_overview.svg",
                "perf_test1_arithmetic.svg",
                "perf_test2_multiplication.svg",
                "perf_test3_division.svg",
                "perf_test4_bit.svg",
                "perf_test5_loops.svg",
                "perf_comparison.svg",
                "perf_trend_arithmetic.svg",
                "perf_trend_multiplication.svg",
                "perf_trend_division.svg",
                "perf_trend_bit.svg",
                "perf_trend_loops.svg",
            ]
        );
        assert!(plan.jobs[..6].iter().all(|j| j.path.starts_with("doc")));
        assert!(plan.jobs[6..]
            .iter()
            .all(|j| j.destination == Destination::Suite));
    }

    #[test]
    fn one_bad_chart_does_not_block_the_rest() {
        let mut series = AggregatedSeries::default();
        for (c, base) in [("c2", 20u64), ("c1", 10)] {
            let frame: CommitFrame = (1..=5).map(|id| (id, base + u64::from(id))).collect();
            series.frames.insert(c.into(), frame);
            series.commits.push(c.into());
        }
        let dir = tempfile::tempdir().unwrap();
        let mut plan = ChartPlan::standard(
            &REFERENCE_CATALOG,
            &dir.path().join("doc"),
            &dir.path().join("suite"),
            ChartSizes::default(),
        );
        plan.jobs.insert(
            1,
            ChartJob {
                destination: Destination::Docs,
                spec: ChartSpec::Trend {
                    test_id: 77,
                    size: (100, 100),
                },
                path: dir.path().join("doc").join("bogus.svg"),
            },
        );

        let report = plan.execute(&series, &REFERENCE_CATALOG);
        assert!(!report.success());
        assert_eq!(report.charts.len(), 13);
        assert_eq!(report.rendered(), 12);
        assert_eq!(report.failed(), 1);
        assert!(matches!(report.charts[1].status, ChartStatus::Failed(_)));
        assert!(dir.path().join("suite/perf_trend_loops.svg").exists());
    }

    #[test]
    fn insufficient_series_is_not_success() {
        let dir = tempfile::tempdir().unwrap();
        let plan = ChartPlan::standard(
            &REFERENCE_CATALOG,
            &dir.path().join("doc"),
            &dir.path().join("suite"),
            ChartSizes::default(),
        );
        let report = plan.execute(&AggregatedSeries::default(), &REFERENCE_CATALOG);
        assert!(!report.success());
        assert_eq!(report.rendered(), 0);
        assert!(report
            .charts
            .iter()
            .all(|c| c.status == ChartStatus::InsufficientData { commits: 0 }));
    }
}
