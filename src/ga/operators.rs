//! Genetic operators for fixed-length string genomes.
//!
//! - [`random_gene`] / [`random_genome`]: uniform characters over
//!   [`GENE_MIN`]..=[`GENE_MAX`]
//! - [`combine_genome`]: midpoint crossover of two parents
//! - [`mutate_genome`]: per-position resampling at a given rate

use super::types::{Individual, Target};
use crate::error::Result;
use rand::Rng;

/// Lowest gene code point (space).
pub const GENE_MIN: u8 = 32;

/// Highest gene code point (`~`). DEL (127) is excluded.
pub const GENE_MAX: u8 = 126;

/// Draws one character uniformly from the gene range.
pub fn random_gene<R: Rng>(rng: &mut R) -> char {
    char::from(rng.random_range(GENE_MIN..=GENE_MAX))
}

/// Draws `len` independent random genes.
pub fn random_genome<R: Rng>(len: usize, rng: &mut R) -> String {
    (0..len).map(|_| random_gene(rng)).collect()
}

/// Whether `c` can ever appear in a genome.
pub fn is_gene(c: char) -> bool {
    (char::from(GENE_MIN)..=char::from(GENE_MAX)).contains(&c)
}

/// Midpoint crossover.
///
/// Both parents are split at `len / 2`. A fair coin picks either
/// `parent1.head + parent2.tail` or `parent2.head + parent1.tail`.
/// The child is scored against `target`; neither parent is modified.
///
/// # Complexity
/// O(n) time, O(n) space
pub fn combine_genome<R: Rng>(
    parent1: &Individual,
    parent2: &Individual,
    target: &Target,
    rng: &mut R,
) -> Result<Individual> {
    let (head, tail) = if rng.random_bool(0.5) {
        (parent1.genome(), parent2.genome())
    } else {
        (parent2.genome(), parent1.genome())
    };

    let genome = splice(head, tail);
    let fitness = target.fitness(&genome)?;
    Ok(Individual::new(genome, fitness))
}

/// `head`'s first half followed by `tail`'s second half, split by
/// character count.
fn splice(head: &str, tail: &str) -> String {
    let mid_head = head.chars().count() / 2;
    let mid_tail = tail.chars().count() / 2;
    head.chars()
        .take(mid_head)
        .chain(tail.chars().skip(mid_tail))
        .collect()
}

/// Resamples each position independently with probability `rate`.
///
/// A uniform draw `u ∈ [0, 1)` with `u <= rate` triggers replacement by
/// a fresh [`random_gene`]. A rate of `0.0` never mutates. Fitness is
/// recomputed over the whole genome whatever the outcome.
pub fn mutate_genome<R: Rng>(
    individual: &mut Individual,
    rate: f64,
    target: &Target,
    rng: &mut R,
) -> Result<()> {
    let genome: String = individual
        .genome()
        .chars()
        .map(|c| {
            let draw: f64 = rng.random();
            if rate > 0.0 && draw <= rate {
                random_gene(rng)
            } else {
                c
            }
        })
        .collect();

    let fitness = target.fitness(&genome)?;
    individual.set_genome(genome);
    individual.set_fitness(fitness);
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
