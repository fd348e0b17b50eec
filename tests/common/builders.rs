//! Test builders: ergonomic constructors for sampler records and summaries.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. They panic on invalid input rather than returning `Result`.

use serde_json::{json, Value};

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One `timestamp,name,cpu,mem` record.
pub fn record(ts: &str, name: &str, cpu: &str, mem: &str) -> Vec<String> {
    vec![ts.to_string(), name.to_string(), cpu.to_string(), mem.to_string()]
}

/// Fluent builder for a sequence of sampler records.
///
/// # Example
///
/// ```rust
/// let rows = RecordsBuilder::new()
///     .sample(1000, "app-1", "12.5%", "512MiB")
///     .raw(&["1001", "app-1"])
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct RecordsBuilder {
    records: Vec<Vec<String>>,
}

impl RecordsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample(mut self, ts: i64, name: &str, cpu: &str, mem: &str) -> Self {
        self.records.push(record(&ts.to_string(), name, cpu, mem));
        self
    }

    /// A record with arbitrary (possibly too few) fields.
    pub fn raw(mut self, fields: &[&str]) -> Self {
        self.records
            .push(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn build(self) -> Vec<Vec<String>> {
        self.records
    }
}

// ---------------------------------------------------------------------------
// Summaries
// ---------------------------------------------------------------------------

/// Fluent builder for a k6 end-of-test summary document.
#[derive(Debug, Clone)]
pub struct SummaryBuilder {
    rate: f64,
    avg: f64,
    p95: f64,
    p99: f64,
    max: f64,
    removed: Vec<(&'static str, &'static str)>,
}

impl SummaryBuilder {
    pub fn new(rate: f64) -> Self {
        Self {
            rate,
            avg: 10.0,
            p95: 25.0,
            p99: 40.0,
            max: 120.0,
            removed: Vec::new(),
        }
    }

    pub fn latency(mut self, avg: f64, p95: f64, p99: f64, max: f64) -> Self {
        self.avg = avg;
        self.p95 = p95;
        self.p99 = p99;
        self.max = max;
        self
    }

    /// Drop `metrics.<metric>.<field>` from the document.
    pub fn without(mut self, metric: &'static str, field: &'static str) -> Self {
        self.removed.push((metric, field));
        self
    }

    pub fn build(self) -> Value {
        let mut doc = json!({
            "root_group": { "name": "", "path": "", "checks": [] },
            "metrics": {
                "http_reqs": { "count": (self.rate * 60.0).round(), "rate": self.rate },
                "http_req_duration": {
                    "avg": self.avg,
                    "min": 0.4,
                    "med": self.avg,
                    "max": self.max,
                    "p(90)": self.p95 * 0.8,
                    "p(95)": self.p95,
                    "p(99)": self.p99
                },
                "http_req_failed": { "passes": 0, "fails": 1000, "value": 0 }
            }
        });
        for (metric, field) in self.removed {
            if let Some(obj) = doc["metrics"][metric].as_object_mut() {
                obj.remove(field);
            }
        }
        doc
    }
}
