//! End-to-end tests for the `pepr-bench-ultra` driver.

use assert_cmd::Command;
use predicates::prelude::*;

fn ultra() -> Command {
    Command::cargo_bin("pepr-bench-ultra").unwrap()
}

/// Flags that strip every pause out of the pipeline so tests stay fast.
const FAST: [&str; 12] = [
    "--stability-timeout",
    "0",
    "--poll-interval",
    "0",
    "--warmup-sleep",
    "0",
    "--between-runs-sleep",
    "0",
    "--quick-runs",
    "1",
    "--quick-sleep",
    "0",
];

#[test]
fn reports_one_number_with_trailing_newline() {
    ultra()
        .args(["/bin/true", "input.png", "/dev/null", "3", "0"])
        .arg("--dry-run")
        .args(FAST)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\.\d{9}\n$").unwrap());
}

#[test]
fn file_output_mode_is_rejected_up_front() {
    ultra()
        .args(["/bin/true", "input.png", "out.pep", "3", "0"])
        .args(FAST)
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not supported"));
}

#[test]
fn warmup_is_floored_at_five() {
    ultra()
        .args(["/bin/true", "input.png", "/dev/null", "1", "0"])
        .arg("--dry-run")
        .args(FAST)
        .assert()
        .success()
        .stderr(predicate::str::contains("Running 5 warmup iterations"));
}

#[test]
fn stats_mode_grades_measurement_quality() {
    ultra()
        .args(["/bin/true", "input.png", "/dev/null", "5", "0"])
        .args(["--dry-run", "--stats"])
        .args(FAST)
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^\d+\.\d{9}\n$").unwrap())
        .stderr(predicate::str::contains("Ultra-Stable Results:"))
        .stderr(predicate::str::contains("Quality:"))
        .stderr(predicate::str::contains("after outlier removal"));
}

#[test]
fn stability_timeout_proceeds_with_a_warning() {
    ultra()
        .args(["/bin/true", "input.png", "/dev/null", "1", "0"])
        .arg("--dry-run")
        .args(FAST)
        .assert()
        .success()
        .stderr(predicate::str::contains("System stability timeout"));
}
