//! Diagnostic rendering and the single-number result sink.
//!
//! Every function takes its output sink explicitly. The drivers pass stderr
//! for diagnostics and stdout for the result, keeping standard output
//! machine-parseable: one number, nine fractional digits, nothing else.

use std::io::{self, Write};

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use indicatif::{ProgressBar, ProgressStyle};
use sysinfo::{CpuRefreshKind, RefreshKind, System};

use crate::stats::Summary;

/// Title block plus a short system-information section.
pub fn banner(diag: &mut dyn Write, title: &str) -> io::Result<()> {
    let separator = "=".repeat(60);
    writeln!(diag, "{separator}")?;
    writeln!(diag, "{:^60}", title.bold().cyan())?;
    writeln!(diag, "{separator}")?;

    writeln!(diag, "OS: {}", os_info::get())?;
    let sys = System::new_with_specifics(
        RefreshKind::nothing().with_cpu(CpuRefreshKind::everything()),
    );
    if let Some(cpu) = sys.cpus().first() {
        writeln!(diag, "CPU: {}", cpu.brand().trim())?;
    }
    writeln!(diag)?;
    Ok(())
}

/// Progress bar over a run loop. Hidden automatically off-terminal.
pub fn progress_bar(len: u64, label: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("##-"),
    );
    pb.set_message(label.to_string());
    pb
}

/// The one number the tool exists to produce.
pub fn write_result(out: &mut dyn Write, seconds: f64, trailing_newline: bool) -> io::Result<()> {
    if trailing_newline {
        writeln!(out, "{seconds:.9}")?;
    } else {
        write!(out, "{seconds:.9}")?;
    }
    out.flush()
}

/// Plain statistics block, one labelled line per figure.
pub fn print_plain_stats(diag: &mut dyn Write, summary: &Summary) -> io::Result<()> {
    writeln!(diag, "Mean: {:.9}s", summary.mean)?;
    writeln!(diag, "Median: {:.9}s", summary.median)?;
    writeln!(
        diag,
        "StdDev: {:.9}s ({:.1}%)",
        summary.stdev,
        summary.coefficient_of_variation()
    )?;
    writeln!(diag, "Min: {:.9}s", summary.min)?;
    writeln!(diag, "Max: {:.9}s", summary.max)?;
    writeln!(diag, "Range: {:.9}s", summary.range)?;
    Ok(())
}

/// Tabular statistics block for the ultra-stable driver, with the quality
/// grade derived from the coefficient of variation.
pub fn print_stats_table(diag: &mut dyn Write, summary: &Summary) -> io::Result<()> {
    writeln!(diag, "{}", "Ultra-Stable Results:".bold().yellow())?;

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Statistic", "Value"]);
    table.add_row(vec!["Mean".to_string(), format!("{:.9}s", summary.mean)]);
    table.add_row(vec!["Median".to_string(), format!("{:.9}s", summary.median)]);
    table.add_row(vec![
        "StdDev".to_string(),
        format!(
            "{:.9}s ({:.1}%)",
            summary.stdev,
            summary.coefficient_of_variation()
        ),
    ]);
    table.add_row(vec!["Min".to_string(), format!("{:.9}s", summary.min)]);
    table.add_row(vec!["Max".to_string(), format!("{:.9}s", summary.max)]);
    table.add_row(vec!["Range".to_string(), format!("{:.9}s", summary.range)]);
    table.add_row(vec![
        "Samples".to_string(),
        format!("{} (after outlier removal)", summary.count),
    ]);
    writeln!(diag, "{table}")?;

    let quality = summary.quality();
    let label = match quality {
        crate::stats::Quality::Excellent => quality.to_string().bold().green(),
        crate::stats::Quality::Good => quality.to_string().bold().cyan(),
        crate::stats::Quality::Fair => quality.to_string().bold().yellow(),
        crate::stats::Quality::Poor => quality.to_string().bold().red(),
    };
    writeln!(diag, "Quality: {label}")?;
    Ok(())
}
