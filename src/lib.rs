//! Benchmark harness for the pepr image encoder
//!
//! This library provides the shared measurement pipeline behind the
//! `pepr-bench` and `pepr-bench-ultra` drivers: stability gating,
//! subprocess timing, and statistical aggregation.

pub mod config;
pub mod error;
pub mod runner;
pub mod stability;
pub mod stats;
pub mod ui;

pub use config::{BenchConfig, InvocationMode, MeasureScheme, Pacing};
pub use error::BenchError;
pub use runner::Runner;
pub use stats::Summary;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
