use clap::{Parser, Subcommand};
use std::path::PathBuf;

use benchplot::benchplot_core::config::Config;
use benchplot::{run_compare, run_stats, CompareRun, StatsRun};

#[derive(Parser)]
#[command(name = "benchplot", about = "Benchmark telemetry reports")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides).
    #[arg(long, global = true)]
    debug: bool,

    /// Config file layered over the defaults and ./benchplot.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Plot per-container CPU and memory from a stats CSV.
    Stats {
        /// Stats CSV (timestamp,name,cpu,mem with a header row).
        csv: PathBuf,
        /// Output HTML path [default: the CSV path with .html].
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Extra entity-name substring to leave out. Repeatable.
        #[arg(long)]
        ignore: Vec<String>,
    },
    /// Compare the newest baseline and candidate k6 summaries.
    Compare {
        /// Directory holding the summaries [default: from config].
        #[arg(long)]
        results_dir: Option<PathBuf>,
        /// Output HTML path [default: from config, inside the results dir].
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Command::Stats {
            csv,
            output,
            ignore,
        } => {
            let written = run_stats(
                &config,
                &StatsRun {
                    csv,
                    output,
                    extra_ignore: ignore,
                },
            )?;
            println!("Generated HTML report: {}", written.display());
        }
        Command::Compare {
            results_dir,
            output,
        } => {
            let outcome = run_compare(&config, &CompareRun { results_dir, output })?;
            println!("Compared:");
            println!("  {}", outcome.baseline.display());
            println!("  {}", outcome.candidate.display());
            println!("Generated comparison report: {}", outcome.output.display());
        }
    }
    Ok(())
}
