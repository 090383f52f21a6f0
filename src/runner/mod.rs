//! Benchmark execution pipeline.
//!
//! One `Runner` drives both the basic and ultra-stable drivers: an untimed
//! warmup phase, a gated timing phase, and an optional untimed artifact run.
//! Only the subprocess wait sits inside the timed window; temp-file setup
//! and teardown happen outside it.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Instant;

use crate::config::{BenchConfig, InvocationMode, MeasureScheme};
use crate::error::BenchError;
use crate::stability::StabilityGate;
use crate::stats::{median, outliers};
use crate::ui;

// ============================================================================
// TARGET INVOCATION
// ============================================================================

/// The encoder binary under test and the two invocation shapes it supports.
pub struct TargetCommand {
    binary: PathBuf,
    image: PathBuf,
}

impl TargetCommand {
    pub fn new(binary: impl Into<PathBuf>, image: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            image: image.into(),
        }
    }

    /// `<binary> --dry-run <image>` — encode to memory only.
    pub fn dry_run(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--dry-run")
            .arg(&self.image)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    /// `<binary> --image <image> <out>` — encode to a file.
    pub fn encode_to(&self, out: &Path) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("--image")
            .arg(&self.image)
            .arg(out)
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }
}

/// Run the target to completion, ignoring launch failures and exit status.
///
/// Exit status is policy, not accident: a failing target's latency is still
/// a sample, and an unreachable target must not abort the session.
fn run_silenced(cmd: &mut Command) {
    let _ = cmd.status();
}

// ============================================================================
// MEASUREMENT PIPELINE
// ============================================================================

pub struct Runner<'a> {
    config: &'a BenchConfig,
    target: TargetCommand,
    gate: Box<dyn StabilityGate>,
}

impl<'a> Runner<'a> {
    pub fn new(config: &'a BenchConfig, gate: Box<dyn StabilityGate>) -> Self {
        Self {
            target: TargetCommand::new(&config.binary, &config.image),
            config,
            gate,
        }
    }

    /// Run the warmup and timing phases and return the collected samples,
    /// outlier-filtered when the session asks for it.
    pub fn execute(&mut self, diag: &mut dyn Write) -> Result<Vec<f64>, BenchError> {
        self.warmup_phase(diag)?;
        let mut samples = self.timing_phase(diag)?;

        if samples.is_empty() {
            return Err(BenchError::NoSamples);
        }

        if self.config.reject_outliers {
            let verdict = outliers::iqr_filter(&samples);
            if verdict.has_outliers() {
                writeln!(
                    diag,
                    "Removed {} outliers: {:?}",
                    verdict.discarded.len(),
                    verdict.discarded
                )?;
            }
            samples = verdict.kept;
        }

        Ok(samples)
    }

    fn warmup_phase(&mut self, diag: &mut dyn Write) -> Result<(), BenchError> {
        let warmup = self.config.warmup;
        writeln!(diag, "Running {warmup} warmup iterations...")?;

        let pb = ui::progress_bar(warmup as u64, "warmup");
        for i in 0..warmup {
            self.untimed_invocation()?;
            pb.inc(1);
            if i + 1 < warmup {
                let pause = self.config.pacing.warmup_pause;
                if !pause.is_zero() {
                    thread::sleep(pause);
                }
                self.gate.wait_until_stable(diag);
            }
        }
        pb.finish_and_clear();
        Ok(())
    }

    fn timing_phase(&mut self, diag: &mut dyn Write) -> Result<Vec<f64>, BenchError> {
        let runs = self.config.runs;
        if self.config.reject_outliers {
            writeln!(diag, "Running {runs} timing iterations with outlier detection...")?;
        } else {
            writeln!(diag, "Running {runs} timing iterations...")?;
        }

        let pb = ui::progress_bar(runs as u64, "timing");
        let mut samples = Vec::with_capacity(runs);

        for i in 0..runs {
            self.gate.wait_until_stable(diag);

            match self.config.measure {
                MeasureScheme::Single => {
                    let elapsed = self.timed_invocation()?;
                    writeln!(diag, "Run {}: {elapsed:.9}s", i + 1)?;
                    samples.push(elapsed);
                }
                MeasureScheme::QuickMedian { count, pause } => {
                    let mut quick = Vec::with_capacity(count);
                    for q in 0..count {
                        quick.push(self.timed_invocation()?);
                        if q + 1 < count && !pause.is_zero() {
                            thread::sleep(pause);
                        }
                    }
                    let sample = median(&quick);
                    let fastest = quick.iter().copied().fold(f64::INFINITY, f64::min);
                    let slowest = quick.iter().copied().fold(f64::NEG_INFINITY, f64::max);
                    writeln!(
                        diag,
                        "Run {}: {sample:.9}s (range: {fastest:.9}-{slowest:.9})",
                        i + 1
                    )?;
                    samples.push(sample);
                }
            }

            pb.inc(1);
            if i + 1 < runs {
                let pause = self.config.pacing.between_runs;
                if !pause.is_zero() {
                    thread::sleep(pause);
                }
            }
        }
        pb.finish_and_clear();

        Ok(samples)
    }

    /// One warmup invocation; file-output mode still cycles a temp file so
    /// warmup exercises the same code path the timed runs will.
    fn untimed_invocation(&self) -> Result<(), BenchError> {
        match self.config.mode {
            InvocationMode::DryRun => run_silenced(&mut self.target.dry_run()),
            InvocationMode::FileOutput => {
                let tmp = scratch_output()?;
                run_silenced(&mut self.target.encode_to(tmp.path()));
                let _ = tmp.close();
            }
        }
        Ok(())
    }

    /// One timed invocation. The timed window covers exactly the
    /// spawn-and-wait call.
    fn timed_invocation(&self) -> Result<f64, BenchError> {
        match self.config.mode {
            InvocationMode::DryRun => {
                let mut cmd = self.target.dry_run();
                let started = Instant::now();
                run_silenced(&mut cmd);
                Ok(started.elapsed().as_secs_f64())
            }
            InvocationMode::FileOutput => {
                let tmp = scratch_output()?;
                let mut cmd = self.target.encode_to(tmp.path());
                let started = Instant::now();
                run_silenced(&mut cmd);
                let elapsed = started.elapsed().as_secs_f64();
                let _ = tmp.close();
                Ok(elapsed)
            }
        }
    }

    /// The final untimed run that materializes the encoded artifact at the
    /// requested output path. Never contributes a sample.
    pub fn finalize(&self, out: &Path) {
        run_silenced(&mut self.target.encode_to(out));
    }
}

/// A uniquely named `.pep` scratch file, so no timed run ever reuses an
/// output path and warms the filesystem cache for the next one.
fn scratch_output() -> std::io::Result<tempfile::NamedTempFile> {
    tempfile::Builder::new()
        .prefix("pepr-bench-")
        .suffix(".pep")
        .tempfile()
}
