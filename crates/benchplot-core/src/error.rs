//! Error types for benchplot-core.
//!
//! Value-level anomalies (a bad size or percentage cell) never reach these
//! types; they are absorbed by the normalizers. What is left are the
//! structural failures that abort a unit of work.

/// Failure while assembling time series from sampler rows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    /// The timestamp field of a record is not an integer number of seconds
    /// (or does not fit once scaled to milliseconds). `row` counts data
    /// records from 1, not including the header line.
    #[error("data row {row} (excluding header): unparseable timestamp {value:?}")]
    UnparseableTimestamp { row: usize, value: String },
}

/// Failure while pairing metrics from two summaries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompareError {
    #[error("summary {summary:?} has no metric at {path}")]
    MissingMetric { summary: String, path: String },

    #[error("summary {summary:?} metric at {path} is not a number")]
    NonNumericMetric { summary: String, path: String },
}

/// Invalid values in an otherwise well-formed configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unit {unit:?}: multiplier {multiplier} must be finite and positive")]
    InvalidUnit { unit: String, multiplier: f64 },

    #[error("invalid metric path {0:?}")]
    InvalidMetricPath(String),

    #[error(transparent)]
    Load(#[from] config::ConfigError),
}
