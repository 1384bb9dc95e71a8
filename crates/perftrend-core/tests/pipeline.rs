mod common;

use std::path::Path;

use common::{create_db, full_run, insert_run};
use perftrend_core::config::PerfTrendConfig;
use perftrend_core::plan::ChartStatus;
use perftrend_core::run::{generate_charts, read_series, RunOutcome, SeriesRead};
use perftrend_core::REFERENCE_CATALOG;

fn config_in(root: &Path) -> PerfTrendConfig {
    PerfTrendConfig::default().resolve(root)
}

fn seed_three_commits(cfg: &PerfTrendConfig) -> anyhow::Result<()> {
    std::fs::create_dir_all(cfg.database.parent().unwrap())?;
    let conn = create_db(&cfg.database)?;
    insert_run(&conn, "2026-05-01T10:00:00Z", "aaa1111", &full_run(1_000))?;
    insert_run(&conn, "2026-05-02T10:00:00Z", "aaa1112", &full_run(2_000))?;
    insert_run(&conn, "2026-05-03T10:00:00Z", "aaa1113", &full_run(3_000))?;
    Ok(())
}

#[test]
fn three_commits_produce_twelve_charts() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let cfg = config_in(root.path());
    seed_three_commits(&cfg)?;

    let report = match generate_charts(&cfg, &REFERENCE_CATALOG)? {
        RunOutcome::Completed(report) => report,
        other => panic!("expected completed run, got {other:?}"),
    };
    assert!(report.success());
    assert_eq!(report.charts.len(), 12);
    assert!(report.charts.iter().all(|c| c.status == ChartStatus::Rendered));

    let doc = root.path().join("doc");
    let suite = root.path().join("tests/PerformanceTests");
    for name in [
        "perf_overview.svg",
        "perf_test1_arithmetic.svg",
        "perf_test5_loops.svg",
    ] {
        assert!(doc.join(name).is_file(), "missing {name}");
    }
    for name in ["perf_comparison.svg", "perf_trend_bit.svg"] {
        assert!(suite.join(name).is_file(), "missing {name}");
    }

    let overview = std::fs::read_to_string(doc.join("perf_overview.svg"))?;
    let p3 = overview.find("aaa1113").expect("newest label");
    let p2 = overview.find("aaa1112").expect("middle label");
    let p1 = overview.find("aaa1111").expect("oldest label");
    assert!(p3 < p2 && p2 < p1, "labels must be most-recent-first");
    Ok(())
}

#[test]
fn missing_store_is_reported_as_no_store() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let cfg = config_in(root.path());

    let outcome = generate_charts(&cfg, &REFERENCE_CATALOG)?;
    assert!(matches!(outcome, RunOutcome::NoStore { .. }));
    assert!(!root.path().join("doc").exists());
    Ok(())
}

#[test]
fn empty_store_is_no_data() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let cfg = config_in(root.path());
    std::fs::create_dir_all(cfg.database.parent().unwrap())?;
    drop(create_db(&cfg.database)?);

    assert!(matches!(
        generate_charts(&cfg, &REFERENCE_CATALOG)?,
        RunOutcome::NoData
    ));
    Ok(())
}

#[test]
fn single_complete_commit_is_insufficient() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let cfg = config_in(root.path());
    std::fs::create_dir_all(cfg.database.parent().unwrap())?;
    let conn = create_db(&cfg.database)?;
    insert_run(&conn, "2026-05-01T10:00:00Z", "only", &full_run(10))?;
    let mut partial = full_run(20);
    partial.pop();
    insert_run(&conn, "2026-05-02T10:00:00Z", "partial", &partial)?;
    drop(conn);

    let outcome = generate_charts(&cfg, &REFERENCE_CATALOG)?;
    assert!(matches!(
        outcome,
        RunOutcome::InsufficientData { commits: 1 }
    ));
    assert!(!root.path().join("doc/perf_overview.svg").exists());
    Ok(())
}

#[test]
fn read_series_respects_max_commits() -> anyhow::Result<()> {
    let root = tempfile::tempdir()?;
    let mut cfg = config_in(root.path());
    seed_three_commits(&cfg)?;
    cfg.max_commits = 2;

    let SeriesRead::Loaded { records, series } = read_series(&cfg, &REFERENCE_CATALOG)? else {
        panic!("expected loaded series");
    };
    assert_eq!(records, 10);
    assert_eq!(series.commits, vec!["aaa1113", "aaa1112"]);
    Ok(())
}
