use perftrend_core::run::{generate_charts, RunOutcome};
use perftrend_core::REFERENCE_CATALOG;

use super::build_config;
use crate::cli::args::RenderArgs;
use crate::exit_codes;

pub fn run(args: RenderArgs) -> anyhow::Result<i32> {
    let mut cfg = build_config(&args.store)?;
    if let Some(dir) = &args.docs_dir {
        cfg.docs_dir = args.store.repo_root.join(dir);
    }
    if let Some(dir) = &args.suite_dir {
        cfg.suite_dir = args.store.repo_root.join(dir);
    }

    tracing::info!("updating performance charts from database");
    let outcome = generate_charts(&cfg, &REFERENCE_CATALOG)?;
    match &outcome {
        RunOutcome::NoStore { .. } => {
            tracing::info!("charts will be generated after performance tests run");
        }
        RunOutcome::StoreUnavailable { path, reason } => {
            eprintln!("Error connecting to database {}: {reason}", path.display());
        }
        RunOutcome::NoData => {
            eprintln!("No data found in database. Performance tests must be run first.");
        }
        RunOutcome::InsufficientData { commits } => {
            eprintln!(
                "Need at least 2 commits with complete data to generate charts (found {commits})."
            );
        }
        RunOutcome::Completed(report) => {
            println!(
                "{} of {} charts updated",
                report.rendered(),
                report.charts.len()
            );
        }
    }
    Ok(exit_codes::for_outcome(&outcome))
}
