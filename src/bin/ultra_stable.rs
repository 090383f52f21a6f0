//! Ultra-stable benchmark driver for the pepr encoder.
//!
//! Addresses variance sources beyond thermal management: gates every run on
//! system load, replaces single measurements with the median of several quick
//! back-to-back runs, and rejects IQR outliers before aggregation. Supports
//! only the memory-only (dry-run) invocation shape.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use pepr_bench::config::{self, BenchConfig, InvocationMode, MeasureScheme, Pacing};
use pepr_bench::stability::{LoadGate, StabilityGate};
use pepr_bench::{ui, BenchError, Runner, Summary};

/// Ultra-stable benchmarking with system monitoring and outlier rejection
#[derive(Parser, Debug)]
#[command(name = "pepr-bench-ultra", version)]
struct Args {
    /// Encoder binary to benchmark
    binary: PathBuf,

    /// Source image handed to the encoder
    image: PathBuf,

    /// Destination of the final encoded artifact
    out: PathBuf,

    /// Timed iterations (floored at 1)
    runs: i64,

    /// Untimed warmup iterations (floored at 5)
    warmup: i64,

    /// Memory-only timing mode; required, file-output is unsupported here
    #[arg(long)]
    dry_run: bool,

    /// Emit full statistics to the diagnostic stream and report the median
    #[arg(long)]
    stats: bool,

    /// CPU utilization ceiling (percent) for the stability predicate
    #[arg(long, default_value_t = 10.0)]
    max_cpu: f64,

    /// One-minute load-average ceiling for the stability predicate
    #[arg(long, default_value_t = 1.0)]
    max_load: f64,

    /// Seconds to wait for stability before proceeding anyway
    #[arg(long, default_value_t = 30.0)]
    stability_timeout: f64,

    /// Seconds between stability polls
    #[arg(long, default_value_t = 2.0)]
    poll_interval: f64,

    /// Seconds to pause between warmup iterations
    #[arg(long, default_value_t = 4.0)]
    warmup_sleep: f64,

    /// Seconds to pause between timed runs
    #[arg(long, default_value_t = 4.0)]
    between_runs_sleep: f64,

    /// Quick back-to-back measurements per run; their median is the sample
    #[arg(long, default_value_t = 3)]
    quick_runs: i64,

    /// Seconds to pause between quick measurements
    #[arg(long, default_value_t = 0.5)]
    quick_sleep: f64,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "Error:".bold().red());
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), BenchError> {
    if !args.dry_run {
        return Err(BenchError::UnsupportedMode(
            "File-output mode is not supported by the ultra-stable driver; pass --dry-run"
                .to_string(),
        ));
    }

    let config = BenchConfig {
        binary: args.binary,
        image: args.image,
        out: args.out,
        runs: config::clamp_runs(args.runs),
        warmup: config::clamp_warmup(args.warmup, 5),
        mode: InvocationMode::DryRun,
        measure: MeasureScheme::QuickMedian {
            count: config::clamp_quick_runs(args.quick_runs),
            pause: config::seconds(args.quick_sleep),
        },
        pacing: Pacing {
            warmup_pause: config::seconds(args.warmup_sleep),
            between_runs: config::seconds(args.between_runs_sleep),
        },
        reject_outliers: true,
        detailed_stats: args.stats,
    };

    let gate: Box<dyn StabilityGate> = Box::new(LoadGate::new(
        args.max_cpu,
        args.max_load,
        config::seconds(args.stability_timeout),
        config::seconds(args.poll_interval),
    ));

    let mut diag = io::stderr();
    ui::banner(&mut diag, "pepr ultra-stable benchmark")?;

    let mut runner = Runner::new(&config, gate);
    let samples = runner.execute(&mut diag)?;

    if config.wants_artifact() {
        runner.finalize(&config.out);
    }

    let summary = Summary::from_samples(&samples).ok_or(BenchError::NoSamples)?;
    let mut out = io::stdout();
    if config.detailed_stats {
        ui::print_stats_table(&mut diag, &summary)?;
        ui::write_result(&mut out, summary.median, true)?;
    } else {
        ui::write_result(&mut out, summary.mean, true)?;
    }

    Ok(())
}
