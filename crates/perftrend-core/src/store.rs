//! Read-only access to the performance results database.
//!
//! The measuring harness owns the schema; this module only joins runs to
//! their results and never writes.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection, OpenFlags};

use crate::catalog::TestCatalog;
use crate::errors::StoreError;
use crate::model::RawRecord;

const RECENT_RESULTS_SQL: &str = "SELECT r.GitCommit, t.TestId, t.TestName, t.Cycles
     FROM PerformanceTestResults t
     INNER JOIN PerformanceTestRuns r ON t.RunId = r.Id
     WHERE r.GitCommit IS NOT NULL AND r.GitCommit != ''
     ORDER BY r.RunTimestamp DESC, r.Id DESC, t.Id ASC
     LIMIT ?1";

/// Scoped handle on the results database. The connection closes on drop.
pub struct ResultStore {
    conn: Connection,
    path: PathBuf,
}

impl ResultStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn = Connection::open_with_flags(path, flags)
            .map_err(|e| StoreError::unavailable(path, e))?;

        // sqlite opens lazily; touch the header so a corrupt file fails here
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })
        .map_err(|e| StoreError::unavailable(path, e))?;

        tracing::debug!(path = %path.display(), "opened performance database");
        Ok(Self {
            conn,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Up to `max_records` rows, most recent run first.
    pub fn fetch_recent(&self, max_records: u32) -> Result<Vec<RawRecord>, StoreError> {
        if max_records == 0 {
            return Err(StoreError::InvalidLimit);
        }
        let mut stmt = self.conn.prepare(RECENT_RESULTS_SQL)?;
        let rows = stmt.query_map(params![max_records], row_to_record)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        tracing::debug!(
            requested = max_records,
            returned = out.len(),
            "fetched recent results"
        );
        Ok(out)
    }

    /// Enough rows to cover `desired_commits` complete commits: one row per
    /// catalog test per commit.
    pub fn fetch_for_commits(
        &self,
        desired_commits: u32,
        catalog: &TestCatalog,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let per_commit = u32::try_from(catalog.len()).unwrap_or(u32::MAX);
        self.fetch_recent(desired_commits.saturating_mul(per_commit))
    }

    pub fn close(self) {
        let path = self.path;
        if let Err((_, e)) = self.conn.close() {
            tracing::warn!(path = %path.display(), "failed to close database: {e}");
        }
    }
}

fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawRecord> {
    let test_id: i64 = row.get(1)?;
    let cycles: i64 = row.get(3)?;
    Ok(RawRecord {
        commit: row.get(0)?,
        test_id: u32::try_from(test_id)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(1, test_id))?,
        test_name: row.get(2)?,
        cycles: u64::try_from(cycles)
            .map_err(|_| rusqlite::Error::IntegralValueOutOfRange(3, cycles))?,
    })
}
