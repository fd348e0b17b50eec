//! Self-contained HTML reports.
//!
//! Each report is a single page that pulls Chart.js from a CDN and carries
//! its data inline as JSON. Two reports exist:
//!
//! - the **resource report**: one CPU and one memory line chart, a line per
//!   entity, on a shared millisecond time axis;
//! - the **comparison report**: one bar chart per [`ChartKind`] present,
//!   baseline and candidate side by side for each metric.

use benchplot_core::{ChartKind, EntitySeries, MetricPair, NormalizedPoint, SeriesSet};
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

use crate::palette::Palette;

const CHART_JS: &str = "https://cdn.jsdelivr.net/npm/chart.js";
const DATE_ADAPTER_JS: &str = "https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns";

/// One side of a comparison as shown on the page.
#[derive(Debug, Clone, Copy)]
pub struct RunInfo<'a> {
    /// Legend label, e.g. `TCP`.
    pub label: &'a str,
    /// File the summary came from.
    pub source_name: &'a str,
}

/// Renders report pages with a fixed palette and generation time.
#[derive(Debug, Clone)]
pub struct Renderer<'a> {
    palette: &'a Palette,
    generated_at: DateTime<Utc>,
}

impl<'a> Renderer<'a> {
    pub fn new(palette: &'a Palette) -> Self {
        Self {
            palette,
            generated_at: Utc::now(),
        }
    }

    /// Pin the generation time shown in the page footer.
    pub fn generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// Resource-usage report for `series`, read from `source_name`.
    pub fn resource_report(
        &self,
        series: &SeriesSet,
        source_name: &str,
        title: &str,
    ) -> Result<String, serde_json::Error> {
        let cpu = line_chart(
            "CPU Usage",
            "CPU %",
            self.line_datasets(series, |s| &s.cpu_points),
        );
        let mem = line_chart(
            "Memory Usage",
            "Memory (MB)",
            self.line_datasets(series, |s| &s.mem_points),
        );

        let body = format!(
            r#"    <h1>{title}</h1>
    <h3>Source: {source}</h3>

    <div class="chart-container">
        <h2>CPU Usage (%)</h2>
        <canvas id="cpuChart"></canvas>
    </div>

    <div class="chart-container">
        <h2>Memory Usage (MB)</h2>
        <canvas id="memChart"></canvas>
    </div>
"#,
            title = escape_html(title),
            source = escape_html(source_name),
        );

        tracing::debug!(
            entities = series.len(),
            points = series.point_count(),
            "rendering resource report"
        );
        let charts = [("cpuChart".to_string(), cpu), ("memChart".to_string(), mem)];
        self.page(title, &[CHART_JS, DATE_ADAPTER_JS], "80%", &body, &charts)
    }

    /// Head-to-head report for `pairs`.
    pub fn comparison_report(
        &self,
        pairs: &[MetricPair],
        baseline: RunInfo<'_>,
        candidate: RunInfo<'_>,
        title: &str,
    ) -> Result<String, serde_json::Error> {
        let title = format!("{title}: {} vs {}", baseline.label, candidate.label);

        let mut body = format!(
            r#"    <h1>{title}</h1>
    <div class="file-info">
        <p>{a_label} Source: {a_source}</p>
        <p>{b_label} Source: {b_source}</p>
    </div>
"#,
            title = escape_html(&title),
            a_label = escape_html(baseline.label),
            a_source = escape_html(baseline.source_name),
            b_label = escape_html(candidate.label),
            b_source = escape_html(candidate.source_name),
        );

        let mut charts = Vec::new();
        for (kind, group) in group_by_chart(pairs) {
            let id = format!("{kind}Chart");
            body.push_str(&format!(
                "\n    <div class=\"chart-container\">\n        <canvas id=\"{id}\"></canvas>\n    </div>\n"
            ));
            charts.push((id, self.bar_chart(kind, &group, baseline, candidate)));
        }

        tracing::debug!(pairs = pairs.len(), charts = charts.len(), "rendering comparison report");
        self.page(&title, &[CHART_JS], "60%", &body, &charts)
    }

    // -----------------------------------------------------------------------
    // Chart building
    // -----------------------------------------------------------------------

    fn line_datasets(
        &self,
        series: &SeriesSet,
        points: impl Fn(&EntitySeries) -> &Vec<NormalizedPoint>,
    ) -> Value {
        series
            .iter()
            .enumerate()
            .map(|(i, s)| {
                json!({
                    "label": s.entity_name,
                    "data": points(s),
                    "borderColor": self.palette.series_color(i).hex(),
                    "fill": false,
                    "tension": 0.1,
                })
            })
            .collect()
    }

    fn bar_chart(
        &self,
        kind: ChartKind,
        pairs: &[&MetricPair],
        baseline: RunInfo<'_>,
        candidate: RunInfo<'_>,
    ) -> Value {
        let labels: Vec<&str> = pairs.iter().map(|p| p.metric_name.as_str()).collect();
        let bars = |label: &str, colour: crate::palette::Rgb, values: Vec<f64>| {
            json!({
                "label": label,
                "data": values,
                "backgroundColor": colour.rgba(0.6),
                "borderColor": colour.rgba(1.0),
                "borderWidth": 1,
            })
        };

        json!({
            "type": "bar",
            "data": {
                "labels": labels,
                "datasets": [
                    bars(baseline.label, self.palette.baseline(), pairs.iter().map(|p| p.value_a).collect()),
                    bars(candidate.label, self.palette.candidate(), pairs.iter().map(|p| p.value_b).collect()),
                ],
            },
            "options": {
                "scales": { "y": { "beginAtZero": true } },
                "plugins": {
                    "title": { "display": true, "text": chart_title(kind) },
                },
            },
        })
    }

    // -----------------------------------------------------------------------
    // Page assembly
    // -----------------------------------------------------------------------

    fn page(
        &self,
        title: &str,
        scripts: &[&str],
        chart_width: &str,
        body: &str,
        charts: &[(String, Value)],
    ) -> Result<String, serde_json::Error> {
        let scripts: String = scripts
            .iter()
            .map(|src| format!("    <script src=\"{src}\"></script>\n"))
            .collect();

        let mut init = String::new();
        for (id, chart) in charts {
            init.push_str(&format!(
                "        new Chart(document.getElementById('{id}'), {});\n",
                script_json(chart)?
            ));
        }

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
{scripts}    <style>
        body {{ font-family: sans-serif; margin: 20px; }}
        .chart-container {{ width: {chart_width}; margin: 20px auto; }}
        h1, h2, h3 {{ text-align: center; }}
        .file-info, footer {{ text-align: center; font-size: 0.9em; color: #666; }}
    </style>
</head>
<body>
{body}
    <footer>Generated {generated}</footer>

    <script>
{init}    </script>
</body>
</html>
"#,
            title = escape_html(title),
            generated = self.generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        ))
    }
}

/// Pairs grouped by chart, groups in first-appearance order.
fn group_by_chart(pairs: &[MetricPair]) -> Vec<(ChartKind, Vec<&MetricPair>)> {
    let mut groups: Vec<(ChartKind, Vec<&MetricPair>)> = Vec::new();
    for pair in pairs {
        match groups.iter_mut().find(|(kind, _)| *kind == pair.chart) {
            Some((_, group)) => group.push(pair),
            None => groups.push((pair.chart, vec![pair])),
        }
    }
    groups
}

fn chart_title(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Throughput => "Throughput (Requests Per Second)",
        ChartKind::Latency => "Latency (ms) - Lower is better",
    }
}

fn line_chart(title: &str, y_label: &str, datasets: Value) -> Value {
    json!({
        "type": "line",
        "data": { "datasets": datasets },
        "options": {
            "scales": {
                "x": {
                    "type": "time",
                    "time": { "unit": "second" },
                    "title": { "display": true, "text": "Time" },
                },
                "y": {
                    "beginAtZero": true,
                    "title": { "display": true, "text": y_label },
                },
            },
            "plugins": {
                "legend": { "position": "right" },
                "title": { "display": true, "text": title },
            },
        },
    })
}

/// JSON safe to inline in a `<script>` element.
fn script_json(value: &Value) -> Result<String, serde_json::Error> {
    Ok(serde_json::to_string(value)?.replace("</", "<\\/"))
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
