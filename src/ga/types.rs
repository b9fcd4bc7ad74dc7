//! Core value types: [`Individual`] and the [`Target`] it is scored
//! against.

use crate::error::{EdenError, Result};
use std::cmp::Ordering;
use std::fmt;

/// A candidate solution: a genome string and its fitness.
///
/// Construction performs no validation. The engine guarantees that every
/// genome it holds has the target's length.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    fitness: f64,
    genome: String,
}

impl Individual {
    pub fn new(genome: impl Into<String>, fitness: f64) -> Self {
        Self {
            fitness,
            genome: genome.into(),
        }
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn genome(&self) -> &str {
        &self.genome
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }

    pub fn set_genome(&mut self, genome: impl Into<String>) {
        self.genome = genome.into();
    }

    /// Ranking order: higher fitness sorts first.
    ///
    /// Equal fitness compares as `Equal`; there is no secondary key.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other.fitness.total_cmp(&self.fitness)
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Individual{{fitness={}, genome='{}'}}",
            self.fitness, self.genome
        )
    }
}

/// The string a population evolves toward.
///
/// Scores genomes by positional agreement: `1 - mismatches / len`.
/// This is a Hamming-style score, not an edit distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    chars: Vec<char>,
}

impl Target {
    pub fn new(target: &str) -> Self {
        Self {
            chars: target.chars().collect(),
        }
    }

    /// Length in characters. Every genome must have this length.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Fitness of `genome` in `[0, 1]`; `1.0` iff it equals the target.
    ///
    /// # Errors
    /// [`EdenError::LengthMismatch`] if the genome's character count
    /// differs from the target's.
    pub fn fitness(&self, genome: &str) -> Result<f64> {
        let actual = genome.chars().count();
        if actual != self.len() {
            return Err(EdenError::LengthMismatch {
                expected: self.len(),
                actual,
            });
        }
        let mismatches = genome
            .chars()
            .zip(self.chars.iter())
            .filter(|(g, t)| g != *t)
            .count();
        Ok(1.0 - mismatches as f64 / self.len() as f64)
    }
}
