//! Logical clock used as the unit of entry age

/// Monotonic operation counter
///
/// Time only moves when the engine calls [`LogicalClock::tick`]; there is no
/// relation to wall-clock time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogicalClock {
    now: u64,
}

impl LogicalClock {
    /// Creates a clock at time zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { now: 0 }
    }

    /// Returns the current logical time.
    #[must_use]
    pub const fn now(&self) -> u64 {
        self.now
    }

    /// Advances the clock by one tick and returns the new time.
    pub fn tick(&mut self) -> u64 {
        self.now = self.now.wrapping_add(1);
        self.now
    }

    /// Returns the clock to time zero.
    pub fn reset(&mut self) {
        self.now = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::LogicalClock;

    #[test]
    fn tick_advances_and_reset_rewinds() {
        let mut clock = LogicalClock::new();
        assert_eq!(clock.now(), 0);
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.now(), 2);

        clock.reset();
        assert_eq!(clock, LogicalClock::default());
    }
}
