//! Engine configuration types and builder patterns
//!
//! This module provides configuration types for the LRFU engine, including
//! the capacity bound, the decay rate and the victim selection strategy.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{LrfuError, LrfuResult};

/// Decay rate used when none is configured
pub const DEFAULT_LAMBDA: f64 = 1.0;

/// Victim selection rule applied when the engine must evict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EvictionStrategy {
    /// Evicts the entry at the back of the recency order
    #[default]
    Recency,
    /// Evicts the entry with the smallest CRF score at the current clock
    ///
    /// Selection scans every live entry, so eviction costs `O(n)`.
    MinimumCrf,
}

/// Configuration for an LRFU engine
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawConfig"))]
pub struct LrfuConfig {
    /// Maximum number of live entries (0 = unbounded)
    pub max_entries: usize,

    /// Decay rate; larger values make old touches fade faster
    pub lambda: f64,

    /// Victim selection rule used on over-capacity inserts
    pub strategy: EvictionStrategy,
}

impl Default for LrfuConfig {
    fn default() -> Self {
        Self { max_entries: 0, lambda: DEFAULT_LAMBDA, strategy: EvictionStrategy::Recency }
    }
}

impl LrfuConfig {
    /// Create a new configuration builder
    pub fn builder() -> LrfuConfigBuilder {
        LrfuConfigBuilder::default()
    }

    /// Quick preset for a capacity-bounded engine
    ///
    /// # Example
    /// ```
    /// use lrfu::LrfuConfig;
    ///
    /// let config = LrfuConfig::bounded(1000, 0.5);
    /// assert_eq!(config.max_entries, 1000);
    /// ```
    pub fn bounded(max_entries: usize, lambda: f64) -> Self {
        Self { max_entries, lambda, ..Self::default() }
    }

    /// Quick preset for an engine that never evicts on its own
    pub fn unbounded(lambda: f64) -> Self {
        Self { max_entries: 0, lambda, ..Self::default() }
    }

    /// Returns `true` when `max_entries` imposes a bound.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.max_entries != 0
    }

    /// Checks that the configuration yields well-defined decay behavior.
    ///
    /// # Errors
    ///
    /// Returns [`LrfuError::InvalidConfiguration`] when `lambda` is negative,
    /// NaN or infinite.
    pub fn validate(&self) -> LrfuResult<()> {
        if !self.lambda.is_finite() {
            return Err(LrfuError::invalid_config(
                "lambda",
                format!("must be a finite number, got {}", self.lambda),
            ));
        }
        if self.lambda < 0.0 {
            return Err(LrfuError::invalid_config(
                "lambda",
                format!("must be non-negative, got {}", self.lambda),
            ));
        }
        Ok(())
    }

    /// Parses and validates a configuration from a TOML document.
    ///
    /// Missing keys fall back to [`LrfuConfig::default`]; unknown keys are
    /// rejected.
    ///
    /// # Example
    /// ```
    /// use lrfu::{EvictionStrategy, LrfuConfig};
    ///
    /// let config = LrfuConfig::from_toml_str(
    ///     r#"
    ///     max_entries = 512
    ///     lambda = 0.25
    ///     strategy = "minimum_crf"
    ///     "#,
    /// )
    /// .unwrap();
    /// assert_eq!(config.strategy, EvictionStrategy::MinimumCrf);
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LrfuError::Parse`] for malformed documents and
    /// [`LrfuError::InvalidConfiguration`] for values that fail validation,
    /// including a negative `max_entries`.
    #[cfg(feature = "serde")]
    pub fn from_toml_str(document: &str) -> LrfuResult<Self> {
        let raw: RawConfig =
            toml::from_str(document).map_err(|e| LrfuError::parse("TOML", e.to_string()))?;
        Self::try_from(raw)
    }
}

/// Wire shape of [`LrfuConfig`] before range checks
///
/// `max_entries` is signed so that negative capacities surface as
/// configuration errors instead of type mismatches.
#[cfg(feature = "serde")]
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    max_entries: i64,
    lambda: f64,
    strategy: EvictionStrategy,
}

#[cfg(feature = "serde")]
impl Default for RawConfig {
    fn default() -> Self {
        Self { max_entries: 0, lambda: DEFAULT_LAMBDA, strategy: EvictionStrategy::Recency }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<RawConfig> for LrfuConfig {
    type Error = LrfuError;

    fn try_from(raw: RawConfig) -> LrfuResult<Self> {
        let max_entries = usize::try_from(raw.max_entries).map_err(|_| {
            LrfuError::invalid_config(
                "max_entries",
                format!("must be a non-negative integer, got {}", raw.max_entries),
            )
        })?;
        let config = Self { max_entries, lambda: raw.lambda, strategy: raw.strategy };
        config.validate()?;
        Ok(config)
    }
}

/// Builder for LrfuConfig with fluent API
#[derive(Debug, Default)]
pub struct LrfuConfigBuilder {
    config: LrfuConfig,
}

impl LrfuConfigBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum number of live entries (0 = unbounded)
    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.config.max_entries = max_entries;
        self
    }

    /// Set the decay rate
    pub fn lambda(mut self, lambda: f64) -> Self {
        self.config.lambda = lambda;
        self
    }

    /// Set the victim selection strategy
    pub fn strategy(mut self, strategy: EvictionStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Build the configuration without validating it
    pub fn build(self) -> LrfuConfig {
        self.config
    }

    /// Build and validate the configuration
    ///
    /// # Errors
    ///
    /// See [`LrfuConfig::validate`].
    pub fn try_build(self) -> LrfuResult<LrfuConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
