//! Pipeline: wires sources, core and renderer into the two report runs.
//!
//! ```text
//! stats:   csv ──► read_stats_csv ──► SeriesBuilder ──► Renderer ──► <csv>.html
//! compare: results dir ──► find_latest ×2 ──► load_summary ──► compare ──► Renderer ──► html
//! ```

use anyhow::Context;
use std::path::{Path, PathBuf};

use benchplot_core::config::Config;
use benchplot_core::{compare, MetricPair, SeriesBuilder};
use benchplot_report::{Palette, Renderer, RunInfo};
use benchplot_sources::{find_latest, load_summary, read_stats_csv};

/// Options for one resource-report run.
#[derive(Debug, Clone, Default)]
pub struct StatsRun {
    pub csv: PathBuf,
    /// Defaults to the CSV path with an `.html` extension.
    pub output: Option<PathBuf>,
    /// Ignore patterns added on top of `[stats] ignore`.
    pub extra_ignore: Vec<String>,
}

/// Options for one comparison run.
#[derive(Debug, Clone, Default)]
pub struct CompareRun {
    /// Defaults to `[compare] results_dir`.
    pub results_dir: Option<PathBuf>,
    /// Defaults to `[compare] output` inside the results directory.
    pub output: Option<PathBuf>,
}

/// What a comparison run read and wrote.
#[derive(Debug, Clone)]
pub struct ComparisonOutcome {
    pub baseline: PathBuf,
    pub candidate: PathBuf,
    pub pairs: Vec<MetricPair>,
    pub output: PathBuf,
}

/// Build the resource-usage report for a stats CSV. Returns the written path.
pub fn run_stats(config: &Config, run: &StatsRun) -> anyhow::Result<PathBuf> {
    let mut stats = config.stats.clone();
    stats.ignore.extend(run.extra_ignore.iter().cloned());
    let builder = SeriesBuilder::from_config(&stats, &config.units)?;

    tracing::info!(path = %run.csv.display(), "parsing stats");
    let records = read_stats_csv(&run.csv)?;
    let (series, counts) = builder
        .build_with_stats(&records)
        .with_context(|| format!("building series from {}", run.csv.display()))?;
    if series.is_empty() {
        tracing::warn!(rows = counts.rows, "no entities left to plot");
    }

    let palette = Palette::load_default();
    let html = Renderer::new(&palette).resource_report(
        &series,
        &file_name(&run.csv),
        &config.report.stats_title,
    )?;

    let output = run
        .output
        .clone()
        .unwrap_or_else(|| run.csv.with_extension("html"));
    write_report(&output, &html)?;
    Ok(output)
}

/// Build the baseline-vs-candidate comparison from the newest summaries.
pub fn run_compare(config: &Config, run: &CompareRun) -> anyhow::Result<ComparisonOutcome> {
    let cmp = &config.compare;
    let dir = run.results_dir.as_deref().unwrap_or(&cmp.results_dir);
    let specs = config.metric_specs()?;

    let baseline = find_latest(dir, &cmp.baseline.pattern);
    let candidate = find_latest(dir, &cmp.candidate.pattern);
    for (label, found) in [(&cmp.baseline.label, &baseline), (&cmp.candidate.label, &candidate)] {
        if let Ok(path) = found {
            tracing::info!(label = %label, path = %path.display(), "found summary");
        }
    }
    let baseline = baseline.context("both summaries are needed for a comparison")?;
    let candidate = candidate.context("both summaries are needed for a comparison")?;

    let summary_a = load_summary(&baseline, &cmp.baseline.label)?;
    let summary_b = load_summary(&candidate, &cmp.candidate.label)?;
    let pairs = compare(&summary_a, &summary_b, &specs).with_context(|| {
        format!(
            "comparing {} with {}",
            baseline.display(),
            candidate.display()
        )
    })?;

    let palette = Palette::load_default();
    let html = Renderer::new(&palette).comparison_report(
        &pairs,
        RunInfo {
            label: &cmp.baseline.label,
            source_name: &file_name(&baseline),
        },
        RunInfo {
            label: &cmp.candidate.label,
            source_name: &file_name(&candidate),
        },
        &config.report.compare_title,
    )?;

    let output = run.output.clone().unwrap_or_else(|| dir.join(&cmp.output));
    write_report(&output, &html)?;
    Ok(ComparisonOutcome {
        baseline,
        candidate,
        pairs,
        output,
    })
}

fn write_report(path: &Path, html: &str) -> anyhow::Result<()> {
    std::fs::write(path, html).with_context(|| format!("writing {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = html.len(), "report written");
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
