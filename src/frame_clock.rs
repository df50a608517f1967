//! Frame pacing and frame-time statistics.
use std::time::{Duration, Instant};

/// Soft frame cap.
///
/// Note: this is SOFT, we may sleep a little less or more than asked
/// since keeping time is difficult.
#[derive(Clone, Copy, Debug)]
pub struct FrameLimiter {
    frame_budget: Duration,
}

impl FrameLimiter {
    pub fn new(fps_cap: u64) -> Self {
        let micros = 1_000_000 / fps_cap.max(1);
        Self {
            frame_budget: Duration::from_micros(micros),
        }
    }

    /// How long to sleep if `elapsed` of this frame's budget is spent already.
    pub fn remaining(&self, elapsed: Duration) -> Duration {
        self.frame_budget.saturating_sub(elapsed)
    }

    /// Sleep off whatever is left of the budget for a frame begun at `loop_start`.
    pub fn wait(&self, loop_start: Instant) {
        let remaining = self.remaining(loop_start.elapsed());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

/// Averages over one reporting interval.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameReport {
    /// Seconds.
    pub average_frametime: f64,
    pub fps: f64,
    pub frames: usize,
}

/// Collects frame times and summarises them once per interval.
#[derive(Debug)]
pub struct FrameStats {
    frametimes: Vec<f64>,
    interval: Duration,
    last_report: Instant,
}

impl FrameStats {
    pub fn new(now: Instant) -> Self {
        Self::with_interval(now, Duration::from_secs(1))
    }

    pub fn with_interval(now: Instant, interval: Duration) -> Self {
        Self {
            frametimes: Vec::new(),
            interval,
            last_report: now,
        }
    }

    /// Record one frame that took `frametime` seconds and ended at `now`.
    ///
    /// Returns a report once `interval` has passed since the previous one.
    pub fn record(&mut self, now: Instant, frametime: f64) -> Option<FrameReport> {
        self.frametimes.push(frametime);
        if now.saturating_duration_since(self.last_report) < self.interval {
            return None;
        }
        // can't reduce since we're keeping this Vec around
        let total_time: f64 = self.frametimes.iter().sum();
        let frames = self.frametimes.len();
        let average_frametime = total_time / frames as f64;
        let fps = if average_frametime > 0.0 {
            1.0 / average_frametime
        } else {
            0.0
        };
        self.frametimes.clear();
        self.last_report = now;
        Some(FrameReport {
            average_frametime,
            fps,
            frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_budget() {
        let limiter = FrameLimiter::new(1000);
        assert_eq!(limiter.remaining(Duration::ZERO), Duration::from_millis(1));
        assert_eq!(
            limiter.remaining(Duration::from_micros(400)),
            Duration::from_micros(600)
        );
        assert_eq!(limiter.remaining(Duration::from_millis(5)), Duration::ZERO);
    }

    #[test]
    fn zero_cap_does_not_divide_by_zero() {
        assert_eq!(
            FrameLimiter::new(0).remaining(Duration::ZERO),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn reports_once_per_interval() {
        let start = Instant::now();
        let mut stats = FrameStats::new(start);
        for i in 1..=9 {
            assert!(stats
                .record(start + Duration::from_millis(i * 100), 0.1)
                .is_none());
        }
        let report = stats
            .record(start + Duration::from_millis(1000), 0.1)
            .unwrap();
        assert_eq!(report.frames, 10);
        assert!((report.average_frametime - 0.1).abs() < 1e-12);
        assert!((report.fps - 10.0).abs() < 1e-9);

        // the next interval starts empty
        assert!(stats
            .record(start + Duration::from_millis(1100), 0.1)
            .is_none());
        let report = stats
            .record(start + Duration::from_millis(2000), 0.3)
            .unwrap();
        assert_eq!(report.frames, 2);
        assert!((report.average_frametime - 0.2).abs() < 1e-12);
    }
}
