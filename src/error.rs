//! Error taxonomy for the benchmark drivers.

use std::io;

use thiserror::Error;

/// Fatal conditions a benchmark session can end with.
///
/// Recoverable noise (missing sensors, failing targets, leftover temp files)
/// is absorbed where it occurs; only the complete absence of usable timing
/// data or an impossible mode request surfaces here.
#[derive(Debug, Error)]
pub enum BenchError {
    #[error("No valid timing data collected")]
    NoSamples,

    #[error("{0}")]
    UnsupportedMode(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}
