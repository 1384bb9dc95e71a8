use perftrend_core::run::{read_series, SeriesRead};
use perftrend_core::summary::{format_table, SeriesSummary};
use perftrend_core::REFERENCE_CATALOG;

use super::build_config;
use crate::cli::args::{OutputFormat, ShowArgs};
use crate::exit_codes::{FAILURE, SUCCESS};

pub fn run(args: ShowArgs) -> anyhow::Result<i32> {
    let cfg = build_config(&args.store)?;

    let (records, series) = match read_series(&cfg, &REFERENCE_CATALOG)? {
        SeriesRead::Loaded { records, series } => (records, series),
        SeriesRead::NoStore { path } => {
            eprintln!("No database at {}", path.display());
            return Ok(SUCCESS);
        }
        SeriesRead::StoreUnavailable { path, reason } => {
            eprintln!("Error connecting to database {}: {reason}", path.display());
            return Ok(FAILURE);
        }
        SeriesRead::NoData => {
            eprintln!("No data found in database.");
            return Ok(FAILURE);
        }
    };

    if series.is_empty() {
        eprintln!(
            "No commits with complete results ({} commits seen).",
            series.frames.len()
        );
        return Ok(FAILURE);
    }

    match args.format {
        OutputFormat::Text => print!("{}", format_table(&series, &REFERENCE_CATALOG)),
        OutputFormat::Json => {
            let summary = SeriesSummary::new(&series, &REFERENCE_CATALOG, records);
            println!("{}", summary.to_json_pretty()?);
        }
    }
    Ok(SUCCESS)
}
