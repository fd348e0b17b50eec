//! Core types for benchplot-core.
//!
//! This module defines the data structures that flow out of the core and into
//! the renderer: the validated [`RawSample`], the [`NormalizedPoint`], the
//! per-entity [`EntitySeries`] and the ordered [`SeriesSet`] that owns them.

use indexmap::IndexMap;
use serde::Serialize;

/// One validated resource-sampler row, borrowing its text from the record.
///
/// Built by the series builder after the length check, the ignore check and
/// the timestamp parse have all passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSample<'a> {
    /// Sampler timestamp (seconds since the Unix epoch) scaled to
    /// milliseconds. Scaling is overflow-checked during validation.
    pub timestamp_ms: i64,
    /// Container / process name.
    pub entity_name: &'a str,
    /// CPU usage as printed by the sampler, e.g. `12.5%`.
    pub cpu_raw: &'a str,
    /// Memory usage as printed by the sampler, e.g. `512MiB`.
    pub mem_raw: &'a str,
}

impl RawSample<'_> {
    /// Number of leading fields a record must carry to be considered.
    pub const FIELD_COUNT: usize = 4;
}

/// A single chart point on the shared millisecond time axis.
///
/// Serialized as `{"x": .., "y": ..}`, the shape the chart library expects.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedPoint {
    #[serde(rename = "x")]
    pub timestamp_ms: i64,
    #[serde(rename = "y")]
    pub value: f64,
}

impl NormalizedPoint {
    pub fn new(timestamp_ms: i64, value: f64) -> Self {
        Self {
            timestamp_ms,
            value,
        }
    }
}

/// CPU and memory series for one entity.
///
/// Both vectors are filled from the same row sequence so they always have the
/// same length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySeries {
    #[serde(skip)]
    pub entity_name: String,
    #[serde(rename = "cpu")]
    pub cpu_points: Vec<NormalizedPoint>,
    #[serde(rename = "mem")]
    pub mem_points: Vec<NormalizedPoint>,
}

impl EntitySeries {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            cpu_points: Vec::new(),
            mem_points: Vec::new(),
        }
    }

    /// Number of samples recorded for this entity.
    pub fn len(&self) -> usize {
        self.cpu_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cpu_points.is_empty()
    }

    pub(crate) fn push(&mut self, timestamp_ms: i64, cpu: f64, mem: f64) {
        self.cpu_points.push(NormalizedPoint::new(timestamp_ms, cpu));
        self.mem_points.push(NormalizedPoint::new(timestamp_ms, mem));
    }
}

/// Entity name → series, iterating in first-seen order.
///
/// Serializes transparently as a JSON object whose key order is the
/// first-seen order, so the renderer can hand it to the chart script as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SeriesSet {
    entities: IndexMap<String, EntitySeries>,
}

impl SeriesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn get(&self, entity_name: &str) -> Option<&EntitySeries> {
        self.entities.get(entity_name)
    }

    pub fn contains(&self, entity_name: &str) -> bool {
        self.entities.contains_key(entity_name)
    }

    /// Entity names in first-seen order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// Series in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &EntitySeries> {
        self.entities.values()
    }

    /// Total number of samples across all entities.
    pub fn point_count(&self) -> usize {
        self.entities.values().map(EntitySeries::len).sum()
    }

    /// Series for `entity_name`, created on first sight.
    pub(crate) fn entry(&mut self, entity_name: &str) -> &mut EntitySeries {
        match self.entities.get_index_of(entity_name) {
            Some(idx) => &mut self.entities[idx],
            None => self
                .entities
                .entry(entity_name.to_string())
                .or_insert_with(|| EntitySeries::new(entity_name)),
        }
    }
}

impl<'a> IntoIterator for &'a SeriesSet {
    type Item = &'a EntitySeries;
    type IntoIter = indexmap::map::Values<'a, String, EntitySeries>;

    fn into_iter(self) -> Self::IntoIter {
        self.entities.values()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
