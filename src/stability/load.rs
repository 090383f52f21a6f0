//! System-load gating for the ultra-stable driver.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};

use super::StabilityGate;

/// One snapshot of system utilization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadReading {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    /// One-minute load average; 0.0 on platforms without the concept.
    pub load_average: f64,
}

/// Samples CPU, memory, and load-average figures via `sysinfo`.
///
/// CPU usage needs two refreshes separated by the crate's minimum update
/// interval, so one `sample` call blocks briefly.
pub struct LoadProbe {
    sys: System,
}

impl LoadProbe {
    pub fn new() -> Self {
        Self { sys: System::new() }
    }

    pub fn sample(&mut self) -> LoadReading {
        self.sys.refresh_cpu_usage();
        thread::sleep(MINIMUM_CPU_UPDATE_INTERVAL);
        self.sys.refresh_cpu_usage();
        let cpu_percent = f64::from(self.sys.global_cpu_usage());

        self.sys.refresh_memory();
        let total = self.sys.total_memory();
        let memory_percent = if total == 0 {
            0.0
        } else {
            self.sys.used_memory() as f64 / total as f64 * 100.0
        };

        LoadReading {
            cpu_percent,
            memory_percent,
            load_average: System::load_average().one,
        }
    }
}

impl Default for LoadProbe {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits until the machine is idle enough for a stable measurement.
///
/// Stability means CPU utilization below `max_cpu` percent and the
/// one-minute load average below `max_load`, simultaneously.
pub struct LoadGate {
    max_cpu: f64,
    max_load: f64,
    max_wait: Duration,
    poll_interval: Duration,
    probe: LoadProbe,
}

impl LoadGate {
    pub fn new(max_cpu: f64, max_load: f64, max_wait: Duration, poll_interval: Duration) -> Self {
        Self {
            max_cpu,
            max_load,
            max_wait,
            poll_interval,
            probe: LoadProbe::new(),
        }
    }
}

impl StabilityGate for LoadGate {
    fn wait_until_stable(&mut self, diag: &mut dyn Write) -> bool {
        let _ = writeln!(diag, "Waiting for system stability...");
        let started = Instant::now();

        while started.elapsed() < self.max_wait {
            let reading = self.probe.sample();
            if reading.cpu_percent < self.max_cpu && reading.load_average < self.max_load {
                let _ = writeln!(
                    diag,
                    "System stable: CPU={:.1}%, Load={:.2}",
                    reading.cpu_percent, reading.load_average
                );
                return true;
            }
            let _ = writeln!(
                diag,
                "Waiting... CPU={:.1}%, Load={:.2}",
                reading.cpu_percent, reading.load_average
            );
            thread::sleep(self.poll_interval);
        }

        let _ = writeln!(diag, "Warning: System stability timeout. Proceeding anyway.");
        false
    }
}
