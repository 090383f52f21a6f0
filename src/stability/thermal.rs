//! Thermal-cooldown gating via the kernel's thermal zones.

use std::io::Write;
use std::thread;
use std::time::{Duration, Instant};

use super::StabilityGate;

/// CPU temperature in °C, or `None` when no thermal zone is readable.
///
/// Scans `/sys/class/thermal/thermal_zone{0..9}/temp` and returns the first
/// zone that parses. Non-Linux platforms have no such sensor here.
pub fn read_cpu_temp() -> Option<f64> {
    #[cfg(target_os = "linux")]
    for zone in 0..10 {
        let path = format!("/sys/class/thermal/thermal_zone{zone}/temp");
        if let Ok(raw) = std::fs::read_to_string(&path) {
            if let Ok(millidegrees) = raw.trim().parse::<i64>() {
                return Some(millidegrees as f64 / 1000.0);
            }
        }
    }
    None
}

/// Waits for the CPU to shed heat before the next run.
///
/// Stability means the temperature dropped at least `target_drop` below the
/// reading taken when the wait began. When the sensor yields nothing at wait
/// start, the gate substitutes one conservative fixed sleep instead; when it
/// disappears mid-poll, polling stops and the wait counts as timed out.
pub struct ThermalGate {
    target_drop: f64,
    max_wait: Duration,
    poll_interval: Duration,
    fallback_delay: Duration,
    reader: fn() -> Option<f64>,
}

impl ThermalGate {
    /// Gate with the stock policy: 5 °C drop, 60 s deadline, 1 s polls,
    /// 3 s blind fallback.
    pub fn new() -> Self {
        Self {
            target_drop: 5.0,
            max_wait: Duration::from_secs(60),
            poll_interval: Duration::from_secs(1),
            fallback_delay: Duration::from_secs(3),
            reader: read_cpu_temp,
        }
    }

    /// Fully parameterized gate with an injected temperature source.
    pub fn with_policy(
        target_drop: f64,
        max_wait: Duration,
        poll_interval: Duration,
        fallback_delay: Duration,
        reader: fn() -> Option<f64>,
    ) -> Self {
        Self {
            target_drop,
            max_wait,
            poll_interval,
            fallback_delay,
            reader,
        }
    }
}

impl Default for ThermalGate {
    fn default() -> Self {
        Self::new()
    }
}

impl StabilityGate for ThermalGate {
    fn wait_until_stable(&mut self, diag: &mut dyn Write) -> bool {
        let Some(initial) = (self.reader)() else {
            // No sensor: a blind conservative pause is the whole policy.
            thread::sleep(self.fallback_delay);
            return true;
        };

        let _ = writeln!(diag, "Initial CPU temp: {initial:.1}°C");
        let started = Instant::now();

        while started.elapsed() < self.max_wait {
            thread::sleep(self.poll_interval);
            let Some(current) = (self.reader)() else {
                break;
            };
            let drop = initial - current;
            if drop >= self.target_drop {
                let _ = writeln!(diag, "CPU cooled to {current:.1}°C (Δ{drop:.1}°C)");
                return true;
            }
        }

        if let Some(current) = (self.reader)() {
            let _ = writeln!(
                diag,
                "Timeout waiting for cooling. Current temp: {current:.1}°C"
            );
        }
        false
    }
}
