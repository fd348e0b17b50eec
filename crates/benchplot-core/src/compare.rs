//! Metric comparison: pairs the same metrics from two load-test summaries.
//!
//! A [`MetricSpec`] names a metric and the dotted path that reaches it in a
//! summary document (`metrics.http_req_duration.p(95)`). [`compare`] applies
//! each metric spec to both summaries and returns one [`MetricPair`] per
//! metric, in the order given. Any missing or non-numeric field fails the
//! whole comparison.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use crate::error::{CompareError, ConfigError};

/// Which chart a metric is drawn in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Throughput,
    #[default]
    Latency,
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartKind::Throughput => write!(f, "throughput"),
            ChartKind::Latency => write!(f, "latency"),
        }
    }
}

// ---------------------------------------------------------------------------
// MetricPath
// ---------------------------------------------------------------------------

/// Dotted path into a JSON document. Segments are object keys taken
/// verbatim, so `p(95)` is a single segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricPath(Vec<String>);

impl MetricPath {
    /// Walk the path through nested objects.
    pub fn lookup<'a>(&self, document: &'a Value) -> Option<&'a Value> {
        self.0
            .iter()
            .try_fold(document, |node, segment| node.get(segment.as_str()))
    }
}

impl FromStr for MetricPath {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let segments: Vec<String> = s.trim().split('.').map(str::to_string).collect();
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(ConfigError::InvalidMetricPath(s.to_string()));
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for MetricPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join("."))
    }
}

// ---------------------------------------------------------------------------
// Summary / MetricSpec / MetricPair
// ---------------------------------------------------------------------------

/// A parsed summary document with the label of the run that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub label: String,
    pub document: Value,
}

impl Summary {
    pub fn new(label: impl Into<String>, document: Value) -> Self {
        Self {
            label: label.into(),
            document,
        }
    }
}

/// A named metric and where to find it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSpec {
    pub display_name: String,
    pub path: MetricPath,
    pub chart: ChartKind,
}

impl MetricSpec {
    pub fn new(
        display_name: impl Into<String>,
        path: &str,
        chart: ChartKind,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            display_name: display_name.into(),
            path: path.parse()?,
            chart,
        })
    }

    /// Pull this metric out of `summary`.
    pub fn extract(&self, summary: &Summary) -> Result<f64, CompareError> {
        let value = self
            .path
            .lookup(&summary.document)
            .ok_or_else(|| CompareError::MissingMetric {
                summary: summary.label.clone(),
                path: self.path.to_string(),
            })?;
        value.as_f64().ok_or_else(|| CompareError::NonNumericMetric {
            summary: summary.label.clone(),
            path: self.path.to_string(),
        })
    }
}

/// One metric from both runs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricPair {
    pub metric_name: String,
    pub value_a: f64,
    pub value_b: f64,
    pub chart: ChartKind,
}

/// The k6 end-of-test metrics compared by default: throughput, then
/// average, p95, p99 and max request duration.
pub fn k6_default_specs() -> Vec<MetricSpec> {
    const SPECS: &[(&str, &str, ChartKind)] = &[
        ("RPS (req/s)", "metrics.http_reqs.rate", ChartKind::Throughput),
        ("Avg Latency (ms)", "metrics.http_req_duration.avg", ChartKind::Latency),
        ("P95 Latency (ms)", "metrics.http_req_duration.p(95)", ChartKind::Latency),
        ("P99 Latency (ms)", "metrics.http_req_duration.p(99)", ChartKind::Latency),
        ("Max Latency (ms)", "metrics.http_req_duration.max", ChartKind::Latency),
    ];
    SPECS
        .iter()
        .map(|&(name, path, chart)| MetricSpec {
            display_name: name.to_string(),
            path: MetricPath(path.split('.').map(str::to_string).collect()),
            chart,
        })
        .collect()
}

/// Pair every spec'd metric from `summary_a` and `summary_b`.
///
/// Output order is `specs` order. The first missing or non-numeric field
/// aborts the comparison; no partial result is returned.
pub fn compare(
    summary_a: &Summary,
    summary_b: &Summary,
    specs: &[MetricSpec],
) -> Result<Vec<MetricPair>, CompareError> {
    specs
        .iter()
        .map(|spec| {
            Ok(MetricPair {
                metric_name: spec.display_name.clone(),
                value_a: spec.extract(summary_a)?,
                value_b: spec.extract(summary_b)?,
                chart: spec.chart,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
