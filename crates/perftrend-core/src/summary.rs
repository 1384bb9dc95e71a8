//! Tabular view of the selected commits, for terminal or JSON output.

use std::fmt::Write as _;

use serde::Serialize;

use crate::catalog::{TestCatalog, TestId};
use crate::model::{short_commit, AggregatedSeries};

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeriesSummary {
    pub schema_version: u32,
    pub records: usize,
    pub commits_seen: usize,
    pub commits: Vec<CommitRow>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CommitRow {
    pub commit: String,
    /// One entry per catalog test, in catalog order.
    pub cycles: Vec<TestCycles>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TestCycles {
    pub test_id: TestId,
    pub test: String,
    pub cycles: u64,
}

impl SeriesSummary {
    pub fn new(series: &AggregatedSeries, catalog: &TestCatalog, records: usize) -> Self {
        let commits = series
            .commits
            .iter()
            .map(|c| CommitRow {
                commit: c.clone(),
                cycles: catalog
                    .entries()
                    .iter()
                    .map(|e| TestCycles {
                        test_id: e.id,
                        test: e.short_name().to_string(),
                        cycles: series.value(c, e.id),
                    })
                    .collect(),
            })
            .collect();
        Self {
            schema_version: 1,
            records,
            commits_seen: series.frames.len(),
            commits,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Fixed-width table: one row per commit, one column per catalog test.
pub fn format_table(series: &AggregatedSeries, catalog: &TestCatalog) -> String {
    let headers: Vec<&str> = catalog.entries().iter().map(|e| e.short_name()).collect();
    let widths: Vec<usize> = catalog
        .entries()
        .iter()
        .zip(&headers)
        .map(|(e, h)| {
            series
                .values_for(e.id)
                .iter()
                .map(|v| v.to_string().len())
                .chain(std::iter::once(h.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:<9}", "commit");
    for (h, w) in headers.iter().zip(widths.iter().copied()) {
        let _ = write!(out, "  {h:>w$}");
    }
    out.push('\n');

    for commit in &series.commits {
        let _ = write!(out, "{:<9}", short_commit(commit));
        for (e, w) in catalog.entries().iter().zip(widths.iter().copied()) {
            let _ = write!(out, "  {:>w$}", series.value(commit, e.id));
        }
        out.push('\n');
    }
    out
}
