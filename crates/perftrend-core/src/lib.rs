//! Performance trend charts from the per-commit results database.
//!
//! Data flows store → [`aggregate::organize`] → [`plan::ChartPlan`] →
//! [`render`]. [`run::generate_charts`] wires the whole pipeline.

pub mod aggregate;
pub mod axis;
pub mod catalog;
pub mod config;
pub mod errors;
pub mod model;
pub mod plan;
pub mod render;
pub mod run;
pub mod store;
pub mod summary;

pub use aggregate::organize;
pub use catalog::{TestCatalog, REFERENCE_CATALOG};
pub use model::{AggregatedSeries, CommitFrame, RawRecord};
pub use store::ResultStore;
