use super::args::*;

pub mod render;
pub mod show;

use anyhow::Context;
use perftrend_core::config::{load_config, PerfTrendConfig};

pub fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Render(args) => render::run(args),
        Command::Show(args) => show::run(args),
    }
}

/// Config file (or defaults) with store flags applied, paths resolved
/// against the repository root.
pub(crate) fn build_config(args: &StoreArgs) -> anyhow::Result<PerfTrendConfig> {
    let mut cfg = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PerfTrendConfig::default(),
    };
    if let Some(db) = &args.db {
        cfg.database = db.clone();
    }
    if let Some(n) = args.max_commits {
        cfg.max_commits = n as usize;
    }
    cfg.validate()?;
    Ok(cfg.resolve(&args.repo_root))
}
