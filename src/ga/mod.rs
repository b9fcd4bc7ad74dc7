//! String-evolving genetic algorithm.
//!
//! A population of fixed-length strings is evolved toward a target
//! string. Each generation the best-ranked adjacent pairs breed by
//! midpoint crossover, offspring are mutated per position, and the
//! worst individuals are trimmed to keep the population size fixed.
//!
//! # Key Types
//!
//! - [`EdenConfig`]: Run parameters (population size, rates, target)
//! - [`Eden`]: Executes the evolutionary loop
//! - [`EvolutionResult`]: Best individual and per-generation fitness log
//! - [`Individual`]: A genome and its fitness
//! - [`Target`]: Scores genomes by positional agreement
//!
//! # Submodules
//!
//! - [`operators`]: Random genes, midpoint crossover, per-position mutation
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Dawkins (1986), *The Blind Watchmaker* ("weasel" program)

mod config;
pub mod operators;
mod runner;
mod types;

pub use config::EdenConfig;
pub use runner::{Eden, EngineState, EvolutionResult};
pub use types::{Individual, Target};
