//! Series builder: assembles per-entity CPU and memory time series from
//! resource-sampler records.
//!
//! Records are text: `timestamp, entity, cpu, mem` with any trailing fields
//! ignored. The builder applies, in order:
//!
//! 1. short records (fewer than four fields) are skipped,
//! 2. entities matching the [`IgnoreSet`] are dropped,
//! 3. the timestamp must be an integer number of seconds,
//! 4. CPU and memory cells go through the normalizers.
//!
//! Entities appear in the resulting [`SeriesSet`] in first-seen order and
//! points stay in input order.

use serde::Deserialize;

use crate::config::StatsConfig;
use crate::error::{ConfigError, SeriesError};
use crate::normalizer::{Normalizer, PercentNormalizer, SizeNormalizer, UnitTable};
use crate::types::{RawSample, SeriesSet};

// ---------------------------------------------------------------------------
// IgnoreSet
// ---------------------------------------------------------------------------

/// Entity-name substrings whose entities are left out of every report.
///
/// Matching is plain substring containment: `infra-redis` drops
/// `bench_infra-redis_1` as well as `infra-redis`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    patterns: Vec<String>,
}

impl IgnoreSet {
    /// Empty patterns are discarded; they would match every name.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::default();
        set.extend(patterns);
        set
    }

    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for pattern in patterns {
            let pattern = pattern.into();
            if pattern.is_empty() {
                tracing::warn!("ignoring empty entity ignore pattern");
                continue;
            }
            if !self.patterns.contains(&pattern) {
                self.patterns.push(pattern);
            }
        }
    }

    pub fn matches(&self, entity_name: &str) -> bool {
        self.patterns.iter().any(|p| entity_name.contains(p.as_str()))
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

// ---------------------------------------------------------------------------
// Timestamp policy
// ---------------------------------------------------------------------------

/// What to do with a record whose timestamp cannot be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimestampPolicy {
    /// Fail the whole build with [`SeriesError::UnparseableTimestamp`].
    #[default]
    Abort,
    /// Drop the record, log a warning and keep going.
    Skip,
}

// ---------------------------------------------------------------------------
// Build statistics
// ---------------------------------------------------------------------------

/// Counters collected during one build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Records seen, including skipped ones.
    pub rows: usize,
    /// Records with fewer than four fields.
    pub malformed: usize,
    /// Records dropped by the ignore set.
    pub ignored: usize,
    /// Records dropped under [`TimestampPolicy::Skip`].
    pub bad_timestamps: usize,
    /// Records that became points.
    pub points: usize,
}

// ---------------------------------------------------------------------------
// SeriesBuilder
// ---------------------------------------------------------------------------

/// Stateless series builder. One instance can serve any number of builds.
#[derive(Debug, Clone, Default)]
pub struct SeriesBuilder {
    ignore: IgnoreSet,
    size: SizeNormalizer,
    percent: PercentNormalizer,
    timestamp_policy: TimestampPolicy,
}

impl SeriesBuilder {
    pub fn new(ignore: IgnoreSet) -> Self {
        Self {
            ignore,
            ..Self::default()
        }
    }

    /// Builder configured from the `[stats]` section and `[units]` overrides.
    pub fn from_config<'a, I>(stats: &StatsConfig, units: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (&'a String, &'a f64)>,
    {
        let units = UnitTable::with_overrides(units.into_iter().map(|(k, v)| (k, *v)))?;
        Ok(Self::new(IgnoreSet::new(stats.ignore.iter().cloned()))
            .with_units(units)
            .with_timestamp_policy(stats.timestamp_policy))
    }

    pub fn with_units(mut self, units: UnitTable) -> Self {
        self.size = SizeNormalizer::new(units);
        self
    }

    pub fn with_timestamp_policy(mut self, policy: TimestampPolicy) -> Self {
        self.timestamp_policy = policy;
        self
    }

    pub fn ignore_set(&self) -> &IgnoreSet {
        &self.ignore
    }

    /// Build series from text records.
    pub fn build<I, R, S>(&self, records: I) -> Result<SeriesSet, SeriesError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        self.build_with_stats(records).map(|(set, _)| set)
    }

    /// Like [`build`](Self::build), also returning the per-build counters.
    pub fn build_with_stats<I, R, S>(
        &self,
        records: I,
    ) -> Result<(SeriesSet, BuildStats), SeriesError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut set = SeriesSet::new();
        let mut stats = BuildStats::default();

        for (index, record) in records.into_iter().enumerate() {
            stats.rows += 1;
            let fields = record.as_ref();
            let Some(sample) = self.sample(index + 1, fields, &mut stats)? else {
                continue;
            };
            self.append(&mut set, sample);
            stats.points += 1;
        }

        tracing::debug!(
            rows = stats.rows,
            malformed = stats.malformed,
            ignored = stats.ignored,
            bad_timestamps = stats.bad_timestamps,
            points = stats.points,
            entities = set.len(),
            "series built"
        );
        Ok((set, stats))
    }

    /// Validate one record; `row` is its 1-based position after the header.
    /// `Ok(None)` means the record is skipped.
    fn sample<'r, S: AsRef<str>>(
        &self,
        row: usize,
        fields: &'r [S],
        stats: &mut BuildStats,
    ) -> Result<Option<RawSample<'r>>, SeriesError> {
        let Some([ts, name, cpu, mem]) = fields.get(..RawSample::FIELD_COUNT) else {
            tracing::debug!(row, fields = fields.len(), "skipping short record");
            stats.malformed += 1;
            return Ok(None);
        };

        let name = name.as_ref();
        if self.ignore.matches(name) {
            stats.ignored += 1;
            return Ok(None);
        }

        let ts = ts.as_ref();
        let Some(timestamp_ms) = parse_timestamp_ms(ts) else {
            return match self.timestamp_policy {
                TimestampPolicy::Abort => Err(SeriesError::UnparseableTimestamp {
                    row,
                    value: ts.to_string(),
                }),
                TimestampPolicy::Skip => {
                    tracing::warn!(row, value = ts, "skipping record with unparseable timestamp");
                    stats.bad_timestamps += 1;
                    Ok(None)
                }
            };
        };

        Ok(Some(RawSample {
            timestamp_ms,
            entity_name: name,
            cpu_raw: cpu.as_ref(),
            mem_raw: mem.as_ref(),
        }))
    }

    fn append(&self, set: &mut SeriesSet, sample: RawSample<'_>) {
        let cpu = self.percent.normalize(sample.cpu_raw);
        let mem = self.size.normalize(sample.mem_raw);
        set.entry(sample.entity_name)
            .push(sample.timestamp_ms, cpu, mem);
    }
}

/// Seconds since the epoch, returned in milliseconds. `None` when the field
/// is not an integer or the millisecond value would overflow.
fn parse_timestamp_ms(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok()?.checked_mul(1000)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
