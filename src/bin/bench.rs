//! Basic benchmark driver for the pepr encoder.
//!
//! Times `runs` invocations of the target, gating each on thermal cooldown
//! (or a fixed delay with `--no-thermal`), and prints the mean elapsed time
//! to stdout — the median with `--stats`.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use colored::Colorize;

use pepr_bench::config::{self, BenchConfig, InvocationMode, MeasureScheme, Pacing};
use pepr_bench::stability::{FixedDelay, StabilityGate, ThermalGate};
use pepr_bench::{ui, BenchError, Runner, Summary};

/// Benchmark a pepr encoder binary under thermal management
#[derive(Parser, Debug)]
#[command(name = "pepr-bench", version)]
struct Args {
    /// Encoder binary to benchmark
    binary: PathBuf,

    /// Source image handed to the encoder
    image: PathBuf,

    /// Destination of the final encoded artifact
    out: PathBuf,

    /// Timed iterations (floored at 1)
    runs: i64,

    /// Untimed warmup iterations (floored at 0)
    warmup: i64,

    /// Delay between runs in seconds when thermal management is off
    #[arg(long, default_value_t = 3.0)]
    delay: f64,

    /// Memory-only timing: no file output during timed runs
    #[arg(long)]
    dry_run: bool,

    /// Disable thermal management and use fixed delays instead
    #[arg(long)]
    no_thermal: bool,

    /// Emit full statistics to the diagnostic stream and report the median
    #[arg(long)]
    stats: bool,
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
    let config = BenchConfig {
        binary: args.binary,
        image: args.image,
        out: args.out,
        runs: config::clamp_runs(args.runs),
        warmup: config::clamp_warmup(args.warmup, 0),
        mode: if args.dry_run {
            InvocationMode::DryRun
        } else {
            InvocationMode::FileOutput
        },
        measure: MeasureScheme::Single,
        pacing: Pacing::none(),
        reject_outliers: false,
        detailed_stats: args.stats,
    };

    let gate: Box<dyn StabilityGate> = if args.no_thermal {
        Box::new(FixedDelay::new(config::seconds(args.delay)))
    } else {
        Box::new(ThermalGate::new())
    };

    let mut diag = io::stderr();
    ui::banner(&mut diag, "pepr benchmark")?;

    let mut runner = Runner::new(&config, gate);
    let samples = runner.execute(&mut diag)?;

    if config.wants_artifact() {
        runner.finalize(&config.out);
    }

    let summary = Summary::from_samples(&samples).ok_or(BenchError::NoSamples)?;
    let mut out = io::stdout();
    if config.detailed_stats {
        ui::print_plain_stats(&mut diag, &summary)?;
        ui::write_result(&mut out, summary.median, false)?;
    } else {
        ui::write_result(&mut out, summary.mean, false)?;
    }

    Ok(())
}
