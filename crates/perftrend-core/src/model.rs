use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::catalog::TestId;

/// Length of the abbreviated commit shown on chart axes.
pub const SHORT_COMMIT_LEN: usize = 7;

/// One result row as read from the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    pub commit: String,
    pub test_id: TestId,
    pub test_name: String,
    pub cycles: u64,
}

impl RawRecord {
    pub fn new(
        commit: impl Into<String>,
        test_id: TestId,
        test_name: impl Into<String>,
        cycles: u64,
    ) -> Self {
        Self {
            commit: commit.into(),
            test_id,
            test_name: test_name.into(),
            cycles,
        }
    }
}

/// Cycles per test for a single commit.
pub type CommitFrame = BTreeMap<TestId, u64>;

/// Frames for every commit seen, plus the ordered commits selected for charting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedSeries {
    /// All commits seen in the input, complete or not.
    pub frames: HashMap<String, CommitFrame>,
    /// Complete commits, most recent first.
    pub commits: Vec<String>,
}

impl AggregatedSeries {
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commits.len()
    }

    pub fn frame(&self, commit: &str) -> Option<&CommitFrame> {
        self.frames.get(commit)
    }

    /// Cycles for `test_id` at `commit`, 0 when absent.
    pub fn value(&self, commit: &str, test_id: TestId) -> u64 {
        self.frames
            .get(commit)
            .and_then(|f| f.get(&test_id))
            .copied()
            .unwrap_or(0)
    }

    /// One value per selected commit, in commit order.
    pub fn values_for(&self, test_id: TestId) -> Vec<u64> {
        self.commits
            .iter()
            .map(|c| self.value(c, test_id))
            .collect()
    }

    pub fn commit_labels(&self) -> Vec<String> {
        self.commits.iter().map(|c| short_commit(c)).collect()
    }
}

pub fn short_commit(commit: &str) -> String {
    commit.chars().take(SHORT_COMMIT_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_commit_truncates_to_seven_chars() {
        assert_eq!(short_commit("0123456789abcdef"), "0123456");
        assert_eq!(short_commit("abc"), "abc");
    }

    #[test]
    fn missing_values_read_as_zero() {
        let mut series = AggregatedSeries::default();
        series
            .frames
            .insert("c1".into(), CommitFrame::from([(1, 10), (2, 20)]));
        series.commits.push("c1".into());

        assert_eq!(series.value("c1", 2), 20);
        assert_eq!(series.value("c1", 3), 0);
        assert_eq!(series.value("nope", 1), 0);
        assert_eq!(series.values_for(1), vec![10]);
    }
}
