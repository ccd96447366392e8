//! Clocks and fixed-rate frame pacing

use std::time::{Duration, Instant};

/// Monotonic time source that can block the caller
pub trait Clock {
    /// Time elapsed since the clock was created
    fn now(&self) -> Duration;
    fn sleep(&mut self, duration: Duration);
}

/// Wall clock backed by `Instant` and `thread::sleep`
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Clock that only moves when told to; sleeping advances it instantly
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Duration,
    slept: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate work taking `duration`
    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }

    /// Total time spent in `sleep`
    pub fn slept(&self) -> Duration {
        self.slept
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.slept += duration;
    }
}

/// Caps the loop at a fixed number of frames per second
///
/// Each `wait` sleeps for whatever is left of the current frame period; a
/// frame that overran its period does not sleep and is not made up later.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    period: Duration,
    frame_start: Option<Duration>,
}

impl FrameLimiter {
    /// `rate` frames per second; 0 disables pacing
    pub fn new(rate: u32) -> Self {
        let period = if rate == 0 {
            Duration::ZERO
        } else {
            Duration::from_secs(1) / rate
        };
        Self {
            period,
            frame_start: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Finish the current frame, sleeping out its remainder; returns the sleep
    pub fn wait<C: Clock + ?Sized>(&mut self, clock: &mut C) -> Duration {
        let now = clock.now();
        let start = *self.frame_start.get_or_insert(now);
        let elapsed = now.saturating_sub(start);

        let remaining = self.period.saturating_sub(elapsed);
        if !remaining.is_zero() {
            clock.sleep(remaining);
        }
        self.frame_start = Some(clock.now());
        remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_rate() {
        assert_eq!(FrameLimiter::new(50).period(), Duration::from_millis(20));
        assert_eq!(FrameLimiter::new(0).period(), Duration::ZERO);
    }

    #[test]
    fn test_sleeps_out_the_frame() {
        let mut clock = ManualClock::new();
        let mut limiter = FrameLimiter::new(50);

        // The first frame is timed from the first wait
        assert_eq!(limiter.wait(&mut clock), Duration::from_millis(20));
        clock.advance(Duration::from_millis(5));
        assert_eq!(limiter.wait(&mut clock), Duration::from_millis(15));
        assert_eq!(clock.now(), Duration::from_millis(40));
        assert_eq!(clock.slept(), Duration::from_millis(35));
    }

    #[test]
    fn test_overrun_frame_does_not_sleep() {
        let mut clock = ManualClock::new();
        let mut limiter = FrameLimiter::new(50);
        limiter.wait(&mut clock);
        let slept_before = clock.slept();

        clock.advance(Duration::from_millis(30));
        assert_eq!(limiter.wait(&mut clock), Duration::ZERO);
        assert_eq!(clock.slept(), slept_before);

        // The next frame gets a full period again
        clock.advance(Duration::from_millis(2));
        assert_eq!(limiter.wait(&mut clock), Duration::from_millis(18));
    }

    #[test]
    fn test_unpaced_limiter_never_sleeps() {
        let mut clock = ManualClock::new();
        let mut limiter = FrameLimiter::new(0);
        for _ in 0..10 {
            limiter.wait(&mut clock);
        }
        assert_eq!(clock.slept(), Duration::ZERO);
    }
}
