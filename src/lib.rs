//! benchplot: benchmark telemetry normalizer and report generator.
//!
//! Reads resource-sampler CSVs and k6 end-of-test summaries, normalizes the
//! numbers they carry, and renders self-contained HTML reports. The library
//! crates are re-exported so integration tests and benches can reach every
//! layer through this one crate.
//!
//! # Architecture
//!
//! ```text
//! Sources ──► Core (SeriesBuilder / compare) ──► Report ──► file
//! ```
//!
//! Everything runs synchronously on the calling thread.

pub mod pipeline;

pub use benchplot_core;
pub use benchplot_report;
pub use benchplot_sources;

pub use pipeline::{run_compare, run_stats, CompareRun, ComparisonOutcome, StatsRun};
