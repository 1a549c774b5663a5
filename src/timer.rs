//! Wall-clock timing for long-running steps.

use std::time::{Duration, Instant};

use tracing::info;

/// Logs `"<label> starting"` when started and `"<label> completed: HH:MM:SS.mmm"`
/// when stopped or dropped.
#[derive(Debug)]
pub struct Timer {
    label: String,
    start: Instant,
    stopped: bool,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        info!("{} starting", label);
        Self {
            label,
            start: Instant::now(),
            stopped: false,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Log completion and return the elapsed time
    pub fn stop(mut self) -> Duration {
        self.report()
    }

    fn report(&mut self) -> Duration {
        let elapsed = self.elapsed();
        if !self.stopped {
            self.stopped = true;
            info!("{} completed: {}", self.label, format_duration(elapsed));
        }
        elapsed
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        self.report();
    }
}

/// Format as `HH:MM:SS.mmm`
pub fn format_duration(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let seconds = (total % 60) as f64 + f64::from(elapsed.subsec_millis()) / 1000.0;
    format!("{:02}:{:02}:{:06.3}", hours, minutes, seconds)
}
