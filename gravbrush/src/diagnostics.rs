use std::{fmt::Display, time::Duration};

use crate::constants::DIAGNOSTICS_WINDOW;

/// Rolling step cost and current population, for display by the host.
#[derive(Debug, Clone)]
pub struct Diagnostics {
    step_times: [Duration; DIAGNOSTICS_WINDOW],
    frame_counter: u64,
    average: Duration,
    particle_count: usize,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self {
            step_times: [Duration::ZERO; DIAGNOSTICS_WINDOW],
            frame_counter: 0,
            average: Duration::ZERO,
            particle_count: 0,
        }
    }
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one step duration. The average is only refreshed once the window has been
    /// overwritten completely, on every `DIAGNOSTICS_WINDOW`th call.
    pub fn update_time(&mut self, duration: Duration) {
        let window = DIAGNOSTICS_WINDOW as u64;
        self.step_times[(self.frame_counter % window) as usize] = duration;
        self.frame_counter += 1;
        if self.frame_counter % window == 0 {
            self.average = self.step_times.iter().sum::<Duration>() / DIAGNOSTICS_WINDOW as u32;
        }
    }

    pub fn update_particle_count(&mut self, count: usize) {
        self.particle_count = count;
    }

    pub fn average_step_time(&self) -> Duration {
        self.average
    }

    pub fn average_step_ms(&self) -> f64 {
        self.average.as_secs_f64() * 1000.0
    }

    pub fn particle_count(&self) -> usize {
        self.particle_count
    }

    /// Number of recorded steps.
    pub fn steps(&self) -> u64 {
        self.frame_counter
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} bodies, {:.3} ms/step ({} steps)",
            self.particle_count,
            self.average_step_ms(),
            self.frame_counter
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::Diagnostics;

    #[test]
    fn average_waits_for_a_full_window() {
        let mut diag = Diagnostics::new();
        for _ in 0..9 {
            diag.update_time(Duration::from_millis(4));
        }
        assert_eq!(diag.average_step_time(), Duration::ZERO);
        diag.update_time(Duration::from_millis(4));
        assert_eq!(diag.average_step_time(), Duration::from_millis(4));
        assert_eq!(diag.steps(), 10);
    }

    #[test]
    fn average_is_cached_between_refreshes() {
        let mut diag = Diagnostics::new();
        for ms in 1..=10 {
            diag.update_time(Duration::from_millis(ms));
        }
        assert_eq!(diag.average_step_time(), Duration::from_micros(5500));

        // Overwrites the oldest five slots; no refresh yet.
        for _ in 0..5 {
            diag.update_time(Duration::from_millis(20));
        }
        assert_eq!(diag.average_step_time(), Duration::from_micros(5500));

        for _ in 0..5 {
            diag.update_time(Duration::from_millis(20));
        }
        assert_eq!(diag.average_step_time(), Duration::from_millis(20));
        assert!((diag.average_step_ms() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn particle_count_and_display() {
        let mut diag = Diagnostics::new();
        diag.update_particle_count(301);
        assert_eq!(diag.particle_count(), 301);
        assert!(diag.to_string().starts_with("301 bodies"));
    }
}
