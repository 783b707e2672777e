use std::time::{Duration, Instant};

pub const DEFAULT_QUESTION_SECS: u32 = 60;

/// One-second resolution countdown for a single question.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Countdown {
    initial: u32,
    remaining: u32,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            initial: seconds,
            remaining: seconds,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn initial(&self) -> u32 {
        self.initial
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }

    pub fn reset(&mut self) {
        self.remaining = self.initial;
    }

    /// Count down one second. Returns `true` only on the tick that reaches zero;
    /// further ticks on an expired countdown do nothing.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}

/// Turns wall-clock time into whole-second ticks. The sub-second remainder
/// carries over between calls so the countdown does not drift.
#[derive(Clone, Copy, Debug)]
pub struct SecondClock {
    anchor: Instant,
}

impl SecondClock {
    pub fn start(now: Instant) -> Self {
        Self { anchor: now }
    }

    pub fn elapsed_seconds(&mut self, now: Instant) -> u32 {
        let secs = now.saturating_duration_since(self.anchor).as_secs();
        self.anchor += Duration::from_secs(secs);
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}

/// Countdown plus the clock feeding it. Owned by the quiz session it times,
/// so dropping the session stops the timer.
#[derive(Clone, Copy, Debug)]
pub struct QuestionTimer {
    countdown: Countdown,
    clock: Option<SecondClock>,
}

impl QuestionTimer {
    pub fn new(seconds: u32) -> Self {
        Self {
            countdown: Countdown::new(seconds),
            clock: None,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.countdown.remaining()
    }

    pub fn ratio_remaining(&self) -> f64 {
        if self.countdown.initial() == 0 {
            return 0.0;
        }
        f64::from(self.countdown.remaining()) / f64::from(self.countdown.initial())
    }

    /// Restore the full allowance; the next wall-clock sample restarts the clock.
    pub fn reset(&mut self) {
        self.countdown.reset();
        self.clock = None;
    }

    pub fn tick(&mut self) -> bool {
        self.countdown.tick()
    }

    /// Whole seconds elapsed since the previous sample. The first sample after
    /// a reset only starts the clock.
    pub fn sample(&mut self, now: Instant) -> u32 {
        match self.clock.as_mut() {
            Some(clock) => clock.elapsed_seconds(now),
            None => {
                self.clock = Some(SecondClock::start(now));
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_expires_after_initial_ticks() {
        let mut c = Countdown::new(60);
        for _ in 0..59 {
            assert!(!c.tick());
        }
        assert_eq!(c.remaining(), 1);
        assert!(c.tick());
        assert!(c.is_expired());
    }

    #[test]
    fn test_countdown_fires_once() {
        let mut c = Countdown::new(2);
        assert!(!c.tick());
        assert!(c.tick());
        assert!(!c.tick());
        assert!(!c.tick());
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn test_reset_restores_initial_exactly() {
        let mut c = Countdown::new(60);
        for _ in 0..10 {
            c.tick();
        }
        c.reset();
        assert_eq!(c.remaining(), 60);
        c.reset();
        assert_eq!(c.remaining(), 60);
    }

    #[test]
    fn test_second_clock_carries_remainder() {
        let start = Instant::now();
        let mut clock = SecondClock::start(start);
        assert_eq!(clock.elapsed_seconds(start + Duration::from_millis(900)), 0);
        assert_eq!(clock.elapsed_seconds(start + Duration::from_millis(1500)), 1);
        assert_eq!(clock.elapsed_seconds(start + Duration::from_millis(2100)), 1);
        assert_eq!(clock.elapsed_seconds(start + Duration::from_millis(5000)), 3);
    }

    #[test]
    fn test_question_timer_first_sample_starts_clock() {
        let start = Instant::now();
        let mut timer = QuestionTimer::new(60);
        assert_eq!(timer.sample(start), 0);
        assert_eq!(timer.sample(start + Duration::from_secs(2)), 2);
        timer.reset();
        assert_eq!(timer.remaining(), 60);
        assert_eq!(timer.sample(start + Duration::from_secs(10)), 0);
    }
}
