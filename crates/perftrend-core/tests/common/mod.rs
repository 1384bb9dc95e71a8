#![allow(dead_code)]

use std::path::Path;

use perftrend_core::REFERENCE_CATALOG;
use rusqlite::{params, Connection};

/// Schema as written by the performance test harness.
pub const HARNESS_DDL: &str = "
CREATE TABLE IF NOT EXISTS PerformanceTestRuns (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    RunTimestamp TEXT NOT NULL,
    GitCommit TEXT,
    MachineName TEXT,
    OsVersion TEXT
);
CREATE TABLE IF NOT EXISTS PerformanceTestResults (
    Id INTEGER PRIMARY KEY AUTOINCREMENT,
    RunId INTEGER NOT NULL,
    TestId INTEGER NOT NULL,
    TestName TEXT NOT NULL,
    Cycles INTEGER NOT NULL,
    Result INTEGER NOT NULL,
    Timestamp TEXT NOT NULL,
    FOREIGN KEY (RunId) REFERENCES PerformanceTestRuns(Id)
);
";

pub fn create_db(path: &Path) -> anyhow::Result<Connection> {
    let conn = Connection::open(path)?;
    conn.execute_batch(HARNESS_DDL)?;
    Ok(conn)
}

pub fn insert_run(
    conn: &Connection,
    timestamp: &str,
    commit: &str,
    results: &[(u32, i64)],
) -> anyhow::Result<i64> {
    conn.execute(
        "INSERT INTO PerformanceTestRuns (RunTimestamp, GitCommit, MachineName, OsVersion)
         VALUES (?1, ?2, 'ci', 'linux')",
        params![timestamp, commit],
    )?;
    let run_id = conn.last_insert_rowid();
    for (test_id, cycles) in results {
        let name = REFERENCE_CATALOG
            .get(*test_id)
            .map(|e| e.name.to_string())
            .unwrap_or_else(|| format!("Test {test_id}: Unknown"));
        conn.execute(
            "INSERT INTO PerformanceTestResults (RunId, TestId, TestName, Cycles, Result, Timestamp)
             VALUES (?1, ?2, ?3, ?4, 0, ?5)",
            params![run_id, test_id, name, cycles, timestamp],
        )?;
    }
    Ok(run_id)
}

/// All five reference tests with distinct cycle counts around `base`.
pub fn full_run(base: i64) -> Vec<(u32, i64)> {
    (1..=5).map(|id| (id, base + i64::from(id) * 17)).collect()
}
