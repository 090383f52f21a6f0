//! Console-facing output: diagnostics styling and result emission.

mod console;

pub use console::{
    banner, print_plain_stats, print_stats_table, progress_bar, write_result,
};
