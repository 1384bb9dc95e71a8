//! Groups raw rows into per-commit frames and selects complete commits.

use std::collections::hash_map::Entry;

use crate::catalog::TestCatalog;
use crate::model::{AggregatedSeries, CommitFrame, RawRecord};

/// Default number of commits shown on a chart.
pub const DEFAULT_MAX_COMMITS: usize = 10;

/// Build frames in input order and keep the first `max_commits` complete
/// commits, in first-seen order.
///
/// Input is expected most-recent-first. A repeated `(commit, test_id)` pair
/// overwrites the earlier value. Rows for tests outside the catalog are
/// ignored, so a frame is complete exactly when it holds every catalog id.
pub fn organize(
    records: &[RawRecord],
    catalog: &TestCatalog,
    max_commits: usize,
) -> AggregatedSeries {
    let mut series = AggregatedSeries::default();
    let mut seen: Vec<&str> = Vec::new();

    for rec in records {
        let frame = match series.frames.entry(rec.commit.clone()) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                seen.push(&rec.commit);
                e.insert(CommitFrame::new())
            }
        };
        if !catalog.contains(rec.test_id) {
            tracing::debug!(
                commit = %rec.commit,
                test_id = rec.test_id,
                "skipping result for test outside catalog"
            );
            continue;
        }
        frame.insert(rec.test_id, rec.cycles);
    }

    for commit in seen {
        if series.commits.len() >= max_commits {
            break;
        }
        let complete = series
            .frames
            .get(commit)
            .is_some_and(|f| f.len() == catalog.len());
        if complete {
            series.commits.push(commit.to_string());
        } else {
            tracing::debug!(commit, "skipping commit with incomplete results");
        }
    }

    series
}
