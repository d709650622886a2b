//! LRFU (Least Recently/Frequently Used) cache engine.
//!
//! Each entry carries a combined recency-frequency (CRF) score that decays
//! exponentially with a logical clock: `weight(age) = 2^(-lambda * age)`.
//! A touch adds `1` to the decayed history, so `lambda = 0` degenerates to
//! touch counting and larger values weigh recency more heavily.
//!
//! The engine is a plain single-threaded value. Callers that share it across
//! threads serialize access themselves (one exclusive section per call) or
//! shard by key.
//!
//! # Modules
//!
//! - **[`engine`]**: the [`Lrfu`] engine
//! - **[`config`]**: [`LrfuConfig`], its builder and eviction strategies
//! - **[`score`]**: the [`Decay`] function
//! - **[`clock`]**: the [`LogicalClock`]
//! - **[`stats`]**: [`LrfuStats`] snapshots
//! - **[`error`]**: [`LrfuError`] and [`LrfuResult`]
//!
//! # Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for the configuration types and
//!   `LrfuConfig::from_toml_str`
//!
//! # Examples
//!
//! ```
//! use lrfu::{EvictionStrategy, Lrfu, LrfuConfig};
//!
//! let config = LrfuConfig::builder()
//!     .max_entries(2)
//!     .lambda(0.0)
//!     .strategy(EvictionStrategy::MinimumCrf)
//!     .try_build()
//!     .unwrap();
//!
//! let mut cache = Lrfu::with_config(config).unwrap();
//! cache.set("hot", 1);
//! cache.get(&"hot");
//! cache.set("cold", 2);
//! cache.set("new", 3); // "cold" has the lowest score
//! assert!(cache.contains(&"hot"));
//! assert!(!cache.contains(&"cold"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod score;
pub mod stats;

// Re-export commonly used types
pub use clock::LogicalClock;
pub use config::{EvictionStrategy, LrfuConfig, LrfuConfigBuilder, DEFAULT_LAMBDA};
pub use engine::{Iter, Lrfu};
pub use error::{LrfuError, LrfuResult};
pub use score::Decay;
pub use stats::LrfuStats;
