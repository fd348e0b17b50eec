//! benchplot-sources: input collaborators for benchplot.
//!
//! Each module reads one kind of benchmark artefact from disk and hands it to
//! the core in the shape the core expects: CSV records for the series
//! builder, labelled [`Summary`](benchplot_core::Summary) documents for the
//! comparator, and newest-file discovery for picking inputs out of a results
//! directory.

pub mod error;
pub mod latest;
pub mod stats;
pub mod summary;

pub use error::SourceError;
pub use latest::find_latest;
pub use stats::read_stats_csv;
pub use summary::load_summary;
