//! Process exit codes. CI treats anything non-zero as "charts not updated".

use perftrend_core::run::RunOutcome;

pub const SUCCESS: i32 = 0;
/// Store unavailable, no data, insufficient data, or a chart failed.
pub const FAILURE: i32 = 1;

pub fn for_outcome(outcome: &RunOutcome) -> i32 {
    match outcome {
        // no database yet is the expected state before the first CI run
        RunOutcome::NoStore { .. } => SUCCESS,
        RunOutcome::StoreUnavailable { .. }
        | RunOutcome::NoData
        | RunOutcome::InsufficientData { .. } => FAILURE,
        RunOutcome::Completed(report) if report.success() => SUCCESS,
        RunOutcome::Completed(_) => FAILURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perftrend_core::plan::{ChartResult, ChartStatus, Destination, PlanReport};
    use std::path::PathBuf;

    fn report(statuses: Vec<ChartStatus>) -> PlanReport {
        PlanReport {
            charts: statuses
                .into_iter()
                .map(|status| ChartResult {
                    path: PathBuf::from("x.svg"),
                    destination: Destination::Docs,
                    status,
                })
                .collect(),
        }
    }

    #[test]
    fn benign_and_fatal_outcomes() {
        assert_eq!(
            for_outcome(&RunOutcome::NoStore {
                path: PathBuf::from("db")
            }),
            SUCCESS
        );
        assert_eq!(for_outcome(&RunOutcome::NoData), FAILURE);
        assert_eq!(
            for_outcome(&RunOutcome::InsufficientData { commits: 1 }),
            FAILURE
        );
        assert_eq!(
            for_outcome(&RunOutcome::StoreUnavailable {
                path: PathBuf::from("db"),
                reason: "locked".into()
            }),
            FAILURE
        );
    }

    #[test]
    fn any_failed_chart_fails_the_run() {
        let ok = report(vec![ChartStatus::Rendered, ChartStatus::Rendered]);
        assert_eq!(for_outcome(&RunOutcome::Completed(ok)), SUCCESS);

        let partial = report(vec![
            ChartStatus::Rendered,
            ChartStatus::Failed("boom".into()),
        ]);
        assert_eq!(for_outcome(&RunOutcome::Completed(partial)), FAILURE);
    }
}
