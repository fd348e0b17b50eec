//! benchplot-core: normalization and time-series assembly.
//!
//! This crate turns raw benchmark telemetry into the structures the report
//! renderer draws from. Everything here is synchronous and pure: no I/O, no
//! state kept between calls.
//!
//! # Architecture
//!
//! ```text
//! stats rows ──► SeriesBuilder ──► SeriesSet ──┐
//!                  │                           ├──► renderer
//!                  └─ Size/PercentNormalizer   │
//! summaries ───► compare ──────► [MetricPair] ─┘
//! ```

pub mod compare;
pub mod config;
pub mod error;
pub mod normalizer;
pub mod series;
pub mod types;

pub use compare::{compare, ChartKind, MetricPair, MetricSpec, Summary};
pub use error::{CompareError, ConfigError, SeriesError};
pub use normalizer::{Normalizer, PercentNormalizer, SizeNormalizer, UnitTable};
pub use series::{BuildStats, IgnoreSet, SeriesBuilder, TimestampPolicy};
pub use types::{EntitySeries, NormalizedPoint, RawSample, SeriesSet};
