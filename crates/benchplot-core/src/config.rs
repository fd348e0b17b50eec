//! Configuration types for benchplot.
//!
//! [`Config::load`] layers, in increasing precedence: the embedded defaults,
//! `~/.config/benchplot/config.toml`, `./benchplot.toml`, and an explicit
//! path. [`Config::defaults`] returns the embedded defaults without touching
//! the filesystem (useful in tests).

use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::compare::{ChartKind, MetricSpec};
use crate::error::ConfigError;
use crate::series::{SeriesBuilder, TimestampPolicy};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[stats]
ignore           = ["infra-kafka-ui", "infra-redis", "infra-mssql"]
timestamp_policy = "abort"

[compare]
results_dir = "k6/results"
output      = "benchmark_comparison.html"

[compare.baseline]
label   = "TCP"
pattern = "k6_summary_TCP_*.json"

[compare.candidate]
label   = "QUIC"
pattern = "k6_summary_QUIC_*.json"

[[compare.metrics]]
name  = "RPS (req/s)"
path  = "metrics.http_reqs.rate"
chart = "throughput"

[[compare.metrics]]
name  = "Avg Latency (ms)"
path  = "metrics.http_req_duration.avg"
chart = "latency"

[[compare.metrics]]
name  = "P95 Latency (ms)"
path  = "metrics.http_req_duration.p(95)"
chart = "latency"

[[compare.metrics]]
name  = "P99 Latency (ms)"
path  = "metrics.http_req_duration.p(99)"
chart = "latency"

[[compare.metrics]]
name  = "Max Latency (ms)"
path  = "metrics.http_req_duration.max"
chart = "latency"

[report]
stats_title   = "Benchmark Resource Usage"
compare_title = "Benchmark Comparison"
"#;

/// Project-local config file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "benchplot.toml";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub stats: StatsConfig,
    /// Extra or overriding size units, as multipliers relative to one MB.
    #[serde(default)]
    pub units: HashMap<String, f64>,
    pub compare: CompareConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

/// `[stats]` section: resource-sampler CSV handling.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsConfig {
    /// Entity-name substrings to drop as noise.
    #[serde(default)]
    pub ignore: Vec<String>,
    #[serde(default)]
    pub timestamp_policy: TimestampPolicy,
}

/// `[compare]` section: k6 summary comparison.
#[derive(Debug, Clone, Deserialize)]
pub struct CompareConfig {
    pub results_dir: PathBuf,
    /// Output file name, relative to `results_dir` unless absolute.
    pub output: PathBuf,
    pub baseline: RunConfig,
    pub candidate: RunConfig,
    pub metrics: Vec<MetricConfig>,
}

/// One side of a comparison: a legend label and the file-name pattern used
/// to find its newest summary.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    pub label: String,
    pub pattern: String,
}

/// One `[[compare.metrics]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct MetricConfig {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub chart: ChartKind,
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_stats_title")]
    pub stats_title: String,
    #[serde(default = "default_compare_title")]
    pub compare_title: String,
}

fn default_stats_title() -> String { "Benchmark Resource Usage".to_string() }
fn default_compare_title() -> String { "Benchmark Comparison".to_string() }

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            stats_title: default_stats_title(),
            compare_title: default_compare_title(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load the layered configuration. `explicit`, when given, must exist;
    /// the user-level and project-level files are optional.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(user_config_path().as_path()).required(false))
            .add_source(config::File::from(Path::new(LOCAL_CONFIG_FILE)).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        builder.build()?.try_deserialize().map_err(Into::into)
    }

    /// Parse a configuration from a TOML string layered over the defaults.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from_str(src, config::FileFormat::Toml))
            .build()?
            .try_deserialize()?)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// Series builder for the `[stats]` and `[units]` sections.
    pub fn series_builder(&self) -> Result<SeriesBuilder, ConfigError> {
        SeriesBuilder::from_config(&self.stats, &self.units)
    }

    /// Metric specs for the `[[compare.metrics]]` entries, in file order.
    pub fn metric_specs(&self) -> Result<Vec<MetricSpec>, ConfigError> {
        self.compare
            .metrics
            .iter()
            .map(|m| MetricSpec::new(m.name.clone(), &m.path, m.chart))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn user_config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("benchplot")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
