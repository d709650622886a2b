//! Combined recency-frequency (CRF) scoring
//!
//! A touch contributes `weight(0) = 1` when it happens and decays as
//! `weight(age) = 2^(-lambda * age)` afterwards, with `age` measured in
//! logical clock ticks. Each entry stores only the score as of its last
//! touch; the current score is that value decayed by the elapsed age, so
//! history never has to be replayed.

/// Exponential decay function parameterised by `lambda`
///
/// `lambda = 0` disables decay and turns the score into a touch count.
/// Larger values make the score favour recency over frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decay {
    lambda: f64,
}

impl Decay {
    /// Creates the decay function for `lambda`.
    ///
    /// `lambda` is expected to be finite and non-negative; see
    /// [`LrfuConfig::validate`](crate::LrfuConfig::validate).
    #[must_use]
    pub const fn new(lambda: f64) -> Self {
        Self { lambda }
    }

    /// Returns the configured decay rate.
    #[must_use]
    pub const fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Weight of a touch that happened `age` ticks ago.
    #[must_use]
    pub fn weight(&self, age: u64) -> f64 {
        (-self.lambda * age as f64).exp2()
    }

    /// Score recorded at `last_reference`, decayed to `now`.
    ///
    /// A `now` earlier than `last_reference` is treated as age zero.
    #[must_use]
    pub fn crf(&self, last_crf: f64, last_reference: u64, now: u64) -> f64 {
        self.weight(now.saturating_sub(last_reference)) * last_crf
    }

    /// Score after a new touch at `now`: the fresh touch plus decayed history.
    #[must_use]
    pub fn touch(&self, last_crf: f64, last_reference: u64, now: u64) -> f64 {
        self.weight(0) + self.crf(last_crf, last_reference, now)
    }
}
