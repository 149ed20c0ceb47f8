//! Frame timing

use std::time::{Duration, Instant};

/// Frame timer that optionally throttles the loop to a target rate
pub struct FrameTimer {
    last_frame: Instant,
    target_period: Option<Duration>,
    delta_time: f64,
    total_time: f64,
    frame_count: u64,
}

impl FrameTimer {
    /// Create a timer targeting `rate_hz` frames per second
    ///
    /// A rate of zero, anything not finite and positive, or a rate so small its
    /// period overflows `Duration` disables throttling.
    pub fn new(rate_hz: f64) -> Self {
        let target_period = (rate_hz.is_finite() && rate_hz > 0.0)
            .then(|| Duration::try_from_secs_f64(1.0 / rate_hz).ok())
            .flatten();
        if target_period.is_none() && rate_hz > 0.0 {
            log::warn!("Update rate {rate_hz} Hz has no usable period, running unthrottled");
        }

        Self {
            last_frame: Instant::now(),
            target_period,
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Wait out the remainder of the frame period, then advance the timer
    ///
    /// Returns the seconds elapsed since the previous tick.
    pub fn tick(&mut self) -> f64 {
        if let Some(period) = self.target_period {
            let spent = self.last_frame.elapsed();
            if spent < period {
                std::thread::sleep(period - spent);
            }
        }

        let now = Instant::now();
        self.delta_time = now.duration_since(self.last_frame).as_secs_f64();
        self.total_time += self.delta_time;
        self.last_frame = now;
        self.frame_count += 1;
        self.delta_time
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f64 {
        self.delta_time
    }

    /// Get the total elapsed time across all ticks
    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    /// Get the current frame count
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Target frame period, if throttled
    pub fn target_period(&self) -> Option<Duration> {
        self.target_period
    }
}
