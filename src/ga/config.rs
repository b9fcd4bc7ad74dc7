//! Engine configuration.
//!
//! [`EdenConfig`] holds every parameter of a run. It is immutable once
//! handed to [`Eden`](super::Eden).

use crate::error::{EdenError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for one evolution run.
///
/// # Defaults
///
/// ```
/// use eden::ga::EdenConfig;
///
/// let config = EdenConfig::new("Hello, world!");
/// assert_eq!(config.population_size, 40);
/// assert_eq!(config.max_iterations, 1_000_000);
/// assert_eq!(config.offspring_count, 25);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use eden::ga::EdenConfig;
///
/// let config = EdenConfig::new("ABC")
///     .with_population_size(10)
///     .with_offspring_count(4)
///     .with_mutation_rate(0.0)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
///
/// # TOML
///
/// Every field except `target` may be omitted:
///
/// ```
/// use eden::ga::EdenConfig;
///
/// let config = EdenConfig::from_toml_str(r#"
///     target = "ABC"
///     mutation_rate = 0.1
/// "#).unwrap();
/// assert_eq!(config.population_size, 40);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EdenConfig {
    /// Number of individuals kept at every generation boundary.
    pub population_size: usize,

    /// Hard cap on the number of generations.
    pub max_iterations: usize,

    /// Per-position probability of replacing a character (0.0–1.0).
    pub mutation_rate: f64,

    /// Best fitness at which the run stops (0.0–1.0).
    pub fitness_target: f64,

    /// String the population evolves toward. Fixes the genome length.
    pub target: String,

    /// Offspring bred per generation. Must be smaller than
    /// `population_size`.
    pub offspring_count: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl Default for EdenConfig {
    fn default() -> Self {
        Self {
            population_size: 40,
            max_iterations: 1_000_000,
            mutation_rate: 0.05,
            fitness_target: 1.0,
            target: String::new(),
            offspring_count: 25,
            seed: None,
        }
    }
}

impl EdenConfig {
    /// Default configuration evolving toward `target`.
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the fitness at which the run stops.
    pub fn with_fitness_target(mut self, fitness: f64) -> Self {
        self.fitness_target = fitness.clamp(0.0, 1.0);
        self
    }

    /// Sets the target string.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// Sets the number of offspring bred per generation.
    pub fn with_offspring_count(mut self, n: usize) -> Self {
        self.offspring_count = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Parses a configuration from TOML text and validates it.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: EdenConfig =
            toml::from_str(contents).map_err(|e| EdenError::ConfigFile(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a TOML configuration file.
    ///
    /// The file is not validated, so a caller may still fill in the
    /// target or override fields before building an engine.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| EdenError::ConfigFile(format!("{}: {}", path.display(), e)))
    }

    /// Validates the configuration.
    ///
    /// Returns [`EdenError::InvalidConfig`] describing the first
    /// offending parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 2 {
            return Err(invalid("population_size must be at least 2"));
        }
        if self.offspring_count >= self.population_size {
            return Err(invalid(format!(
                "offspring_count ({}) must be smaller than population_size ({})",
                self.offspring_count, self.population_size
            )));
        }
        if self.max_iterations == 0 {
            return Err(invalid("max_iterations must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(invalid("mutation_rate must be between 0 and 1"));
        }
        if !(0.0..=1.0).contains(&self.fitness_target) {
            return Err(invalid("fitness_target must be between 0 and 1"));
        }
        if self.target.is_empty() {
            return Err(invalid("target must not be empty"));
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> EdenError {
    EdenError::InvalidConfig(msg.into())
}
