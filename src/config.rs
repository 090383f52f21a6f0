//! Run configuration for a benchmark session.
//!
//! A [`BenchConfig`] is assembled once from command-line arguments and never
//! mutated afterwards. The drivers only differ in how they fill it in.

use std::path::{Path, PathBuf};
use std::time::Duration;

/// How the target encoder is invoked during timed runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationMode {
    /// `<binary> --dry-run <image>` — encode to memory only, no file output.
    DryRun,
    /// `<binary> --image <image> <tmp>` — encode to a fresh temp file per run.
    FileOutput,
}

/// How a single sample is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeasureScheme {
    /// One timed invocation per run.
    Single,
    /// Several back-to-back timed invocations with a short pause between
    /// each; the sample is their median.
    QuickMedian { count: usize, pause: Duration },
}

/// Fixed pauses applied between loop iterations, on top of stability gating.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pacing {
    /// Sleep between warmup iterations (never after the last).
    pub warmup_pause: Duration,
    /// Sleep between timed runs (never after the last).
    pub between_runs: Duration,
}

impl Pacing {
    pub fn none() -> Self {
        Self::default()
    }
}

/// Immutable parameters of one benchmark session.
#[derive(Debug, Clone)]
pub struct BenchConfig {
    /// Encoder binary under test.
    pub binary: PathBuf,
    /// Source image handed to the encoder.
    pub image: PathBuf,
    /// Destination of the final encoded artifact.
    pub out: PathBuf,
    /// Timed iterations, already floored at 1.
    pub runs: usize,
    /// Untimed warmup iterations.
    pub warmup: usize,
    pub mode: InvocationMode,
    pub measure: MeasureScheme,
    pub pacing: Pacing,
    /// Apply the IQR outlier pass to the collected samples.
    pub reject_outliers: bool,
    /// Report the median and emit the full statistics block.
    pub detailed_stats: bool,
}

impl BenchConfig {
    /// Whether the session ends with an untimed artifact-producing run.
    ///
    /// File-output sessions always materialize the artifact; dry-run sessions
    /// only do so when an output path other than `/dev/null` was requested.
    pub fn wants_artifact(&self) -> bool {
        self.mode == InvocationMode::FileOutput || self.out != Path::new("/dev/null")
    }
}

/// Floor the requested run count at 1: a session never has zero timed runs.
pub fn clamp_runs(requested: i64) -> usize {
    requested.max(1) as usize
}

/// Floor the requested warmup count at the driver's minimum.
pub fn clamp_warmup(requested: i64, minimum: i64) -> usize {
    requested.max(minimum) as usize
}

/// Floor the quick-run count at 1 so a measurement always happens.
pub fn clamp_quick_runs(requested: i64) -> usize {
    requested.max(1) as usize
}

/// Convert a user-supplied seconds value into a `Duration`, treating
/// negative input as zero.
pub fn seconds(value: f64) -> Duration {
    Duration::from_secs_f64(value.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_are_floored_at_one() {
        assert_eq!(clamp_runs(0), 1);
        assert_eq!(clamp_runs(-7), 1);
        assert_eq!(clamp_runs(1), 1);
        assert_eq!(clamp_runs(25), 25);
    }

    #[test]
    fn warmup_floor_depends_on_driver() {
        assert_eq!(clamp_warmup(-3, 0), 0);
        assert_eq!(clamp_warmup(0, 0), 0);
        assert_eq!(clamp_warmup(7, 0), 7);
        assert_eq!(clamp_warmup(0, 5), 5);
        assert_eq!(clamp_warmup(2, 5), 5);
        assert_eq!(clamp_warmup(9, 5), 9);
    }

    #[test]
    fn quick_runs_floored_at_one() {
        assert_eq!(clamp_quick_runs(0), 1);
        assert_eq!(clamp_quick_runs(3), 3);
    }

    #[test]
    fn negative_seconds_become_zero() {
        assert_eq!(seconds(-1.5), Duration::ZERO);
        assert_eq!(seconds(0.5), Duration::from_millis(500));
    }

    #[test]
    fn artifact_policy() {
        let mut config = BenchConfig {
            binary: PathBuf::from("pepr"),
            image: PathBuf::from("in.png"),
            out: PathBuf::from("/dev/null"),
            runs: 1,
            warmup: 0,
            mode: InvocationMode::DryRun,
            measure: MeasureScheme::Single,
            pacing: Pacing::none(),
            reject_outliers: false,
            detailed_stats: false,
        };
        assert!(!config.wants_artifact());

        config.out = PathBuf::from("result.pep");
        assert!(config.wants_artifact());

        config.out = PathBuf::from("/dev/null");
        config.mode = InvocationMode::FileOutput;
        assert!(config.wants_artifact());
    }
}
