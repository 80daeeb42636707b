//! Frame pacing statistics for the native viewer.

use web_time::{Duration, Instant};

/// Smoothed frame rate plus a periodic report of how many bursts the
/// animation ignited per second.
///
/// Burst density is tied to the frame rate (one spawn roll per frame), so
/// the report is the way to see what a given display actually produces.
pub struct FrameTiming {
    /// Last frame timestamp
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0)
    smoothing: f32,
    report_interval: Duration,
    last_report: Instant,
    bursts_at_last_report: u64,
}

/// One periodic summary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Smoothed frames per second.
    pub fps: f32,
    /// Bursts ignited per second over the report window.
    pub bursts_per_second: f32,
}

impl FrameTiming {
    /// A timer that reports every `report_interval`.
    #[must_use]
    pub fn new(report_interval: Duration) -> Self {
        Self::starting_at(Instant::now(), report_interval)
    }

    fn starting_at(now: Instant, report_interval: Duration) -> Self {
        Self {
            last_frame: now,
            smoothed_fps: 60.0,
            smoothing: 0.05,
            report_interval,
            last_report: now,
            bursts_at_last_report: 0,
        }
    }

    /// Call after each frame.
    pub fn end_frame(&mut self) {
        self.end_frame_at(Instant::now());
    }

    fn end_frame_at(&mut self, now: Instant) {
        let frame_time = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;
        if frame_time > 0.0 {
            let instant_fps = 1.0 / frame_time;
            self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
                + instant_fps * self.smoothing;
        }
    }

    /// Get the current FPS (smoothed)
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }

    /// A report once per interval, given the engine's running burst total.
    pub fn report(&mut self, bursts_total: u64) -> Option<FrameReport> {
        self.report_at(Instant::now(), bursts_total)
    }

    fn report_at(
        &mut self,
        now: Instant,
        bursts_total: u64,
    ) -> Option<FrameReport> {
        let window = now.duration_since(self.last_report);
        if window < self.report_interval || window.is_zero() {
            return None;
        }
        let bursts = bursts_total.saturating_sub(self.bursts_at_last_report);
        self.last_report = now;
        self.bursts_at_last_report = bursts_total;
        Some(FrameReport {
            fps: self.smoothed_fps,
            bursts_per_second: bursts as f32 / window.as_secs_f32(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_converges_towards_frame_rate() {
        let start = Instant::now();
        let mut timing =
            FrameTiming::starting_at(start, Duration::from_secs(5));
        let frame = Duration::from_millis(10);
        for n in 1..=400 {
            timing.end_frame_at(start + frame * n);
        }
        assert!((timing.fps() - 100.0).abs() < 1.0, "{}", timing.fps());
    }

    #[test]
    fn reports_once_per_interval() {
        let start = Instant::now();
        let mut timing =
            FrameTiming::starting_at(start, Duration::from_secs(2));
        assert!(timing
            .report_at(start + Duration::from_millis(1999), 3)
            .is_none());

        let report = timing
            .report_at(start + Duration::from_secs(2), 4)
            .unwrap();
        assert!((report.bursts_per_second - 2.0).abs() < 1e-4);

        assert!(timing
            .report_at(start + Duration::from_secs(3), 10)
            .is_none());
        let report = timing
            .report_at(start + Duration::from_secs(4), 10)
            .unwrap();
        assert!((report.bursts_per_second - 3.0).abs() < 1e-4);
    }
}
