use std::time::{Duration, Instant};

/// Default dwell time before a gate accepts the opposite condition.
pub const DEFAULT_GATE_DELAY: Duration = Duration::from_millis(1000);

/// A debounced boolean.
///
/// The latched state only flips once the opposite input has been seen
/// continuously for the configured delay. A single agreeing reading cancels a
/// pending flip, so near-threshold noise never reaches the output.
#[derive(Debug, Clone)]
pub struct Hysteresis {
    state: bool,
    rising_delay: Duration,
    falling_delay: Duration,
    last_input: bool,
    last_change: Option<Instant>,
}

impl Hysteresis {
    pub fn new(delay: Duration) -> Self {
        Self::with_delays(delay, delay)
    }

    /// Separate delays for `false -> true` and `true -> false`.
    pub fn with_delays(rising_delay: Duration, falling_delay: Duration) -> Self {
        Self {
            state: false,
            rising_delay,
            falling_delay,
            last_input: false,
            last_change: None,
        }
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.rising_delay = delay;
        self.falling_delay = delay;
    }

    pub fn state(&self) -> bool {
        self.state
    }

    /// Force the latched state and forget any pending change.
    pub fn reset(&mut self, state: bool) {
        self.state = state;
        self.last_input = state;
        self.last_change = None;
    }

    /// Feed the current condition, timed with the wall clock.
    pub fn set(&mut self, condition: bool) -> bool {
        self.set_at(condition, Instant::now())
    }

    /// Feed the current condition observed at `now`.
    pub fn set_at(&mut self, condition: bool, now: Instant) -> bool {
        if condition == self.state {
            self.last_input = condition;
            self.last_change = None;
            return self.state;
        }

        let since = match self.last_change {
            Some(since) if self.last_input == condition => since,
            _ => {
                self.last_change = Some(now);
                now
            }
        };
        self.last_input = condition;

        let delay = if condition {
            self.rising_delay
        } else {
            self.falling_delay
        };
        if now.saturating_duration_since(since) >= delay {
            self.state = condition;
            self.last_change = None;
        }
        self.state
    }
}

impl Default for Hysteresis {
    fn default() -> Self {
        Self::new(DEFAULT_GATE_DELAY)
    }
}
