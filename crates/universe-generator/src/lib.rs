//! Synthetic equity universe.
//!
//! Builds the in-memory dataset the dashboard screens over: randomized
//! fundamentals, generated names and tickers, a five-period history and the
//! rule-based assessment for every security. Output is reproducible for a
//! given seed and as-of date.

pub mod generator;
pub mod history;
pub mod names;
mod sampling;

pub use generator::{find_by_id, GeneratorConfig, UniverseGenerator, DEFAULT_UNIVERSE_SIZE};
pub use history::{generate_history, HISTORY_PERIODS};
