//! Minimal genetic algorithm that evolves strings toward a target.
//!
//! - **Engine** ([`ga::Eden`]): random initialization, adjacent-pair
//!   midpoint crossover, per-position mutation, and truncation of the
//!   worst individuals, repeated until the best fitness reaches a
//!   threshold or an iteration cap is hit.
//! - **Sinks** ([`sink`]): consumers of the per-generation fitness log,
//!   such as the timestamped [`sink::CsvSink`].
//!
//! Fitness is the fraction of positions where a genome agrees with the
//! target, so `1.0` means an exact match.
//!
//! ```
//! use eden::ga::{Eden, EdenConfig};
//!
//! let config = EdenConfig::new("Rust").with_seed(42);
//! let result = Eden::new(config).unwrap().evolve().unwrap();
//! assert!(result.best_fitness() <= 1.0);
//! ```

pub mod error;
pub mod ga;
pub mod sink;

pub use error::{EdenError, Result};
