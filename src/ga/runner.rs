//! The evolutionary loop.
//!
//! [`Eden`] owns the population and drives a single run:
//! initialization → log best → termination check → breed → mutate →
//! sort → trim → repeat.

use super::config::EdenConfig;
use super::operators::{combine_genome, is_gene, mutate_genome, random_genome};
use super::types::{Individual, Target};
use crate::error::{EdenError, Result};
use crate::sink::FitnessSink;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Lifecycle of an [`Eden`] engine. Each engine runs exactly once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Uninitialized,
    Running,
    Terminated,
}

/// Outcome of an evolution run.
#[derive(Debug, Clone)]
pub struct EvolutionResult {
    /// Best individual of the final population.
    pub best: Individual,

    /// Number of generations executed (equals `fitness_log.len()`).
    pub generations: usize,

    /// Whether the best fitness met the configured target.
    pub reached_target: bool,

    /// Best fitness at the start of each generation, indexed by
    /// generation number.
    pub fitness_log: Vec<f64>,
}

impl EvolutionResult {
    pub fn best_fitness(&self) -> f64 {
        self.best.fitness()
    }
}

/// String-evolving genetic algorithm engine.
///
/// # Usage
///
/// ```
/// use eden::ga::{Eden, EdenConfig};
///
/// let config = EdenConfig::new("Hi").with_max_iterations(10_000).with_seed(1);
/// let mut eden = Eden::new(config).unwrap();
/// let result = eden.evolve().unwrap();
/// assert_eq!(result.fitness_log.len(), result.generations);
/// ```
pub struct Eden {
    config: EdenConfig,
    target: Target,
    rng: StdRng,
    population: Vec<Individual>,
    state: EngineState,
}

impl Eden {
    /// Creates an engine whose population is drawn at random when
    /// [`evolve`](Self::evolve) starts.
    ///
    /// # Errors
    /// [`EdenError::InvalidConfig`] if the configuration does not
    /// validate.
    pub fn new(config: EdenConfig) -> Result<Self> {
        config.validate()?;

        let target = Target::new(&config.target);
        if let Some(c) = target.chars().iter().find(|&&c| !is_gene(c)) {
            log::warn!(
                "target contains {:?}, which is outside the gene range; fitness 1.0 is unreachable",
                c
            );
        }

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };

        Ok(Self {
            config,
            target,
            rng,
            population: Vec::new(),
            state: EngineState::Uninitialized,
        })
    }

    /// Creates an engine starting from caller-supplied genomes.
    ///
    /// Genomes are scored and sorted; their count must equal
    /// `population_size`.
    ///
    /// # Errors
    /// [`EdenError::LengthMismatch`] if any genome differs from the
    /// target's length, [`EdenError::InvalidConfig`] if the count is
    /// wrong or the configuration does not validate.
    pub fn with_population<I, S>(config: EdenConfig, genomes: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut eden = Self::new(config)?;
        let population = genomes
            .into_iter()
            .map(|g| {
                let genome = g.into();
                let fitness = eden.target.fitness(&genome)?;
                Ok(Individual::new(genome, fitness))
            })
            .collect::<Result<Vec<_>>>()?;

        if population.len() != eden.config.population_size {
            return Err(EdenError::InvalidConfig(format!(
                "seeded population has {} genomes, expected {}",
                population.len(),
                eden.config.population_size
            )));
        }

        eden.population = population;
        eden.sort_population();
        Ok(eden)
    }

    pub fn config(&self) -> &EdenConfig {
        &self.config
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Current population, best first. Empty before a random
    /// population has been drawn.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Runs the evolution to completion.
    ///
    /// # Errors
    /// [`EdenError::AlreadyEvolved`] if this engine has already run.
    pub fn evolve(&mut self) -> Result<EvolutionResult> {
        if self.state != EngineState::Uninitialized {
            return Err(EdenError::AlreadyEvolved);
        }
        self.state = EngineState::Running;

        let outcome = self.run();
        self.state = EngineState::Terminated;
        let result = outcome?;

        log::info!(
            "End of evolution: fitness target {} objective {:?} best fitness {} best genome {:?}",
            self.config.fitness_target,
            self.config.target,
            result.best.fitness(),
            result.best.genome()
        );
        Ok(result)
    }

    /// Runs the evolution, then hands the fitness log to `sink`.
    ///
    /// A sink failure is logged and does not affect the returned result.
    pub fn evolve_into<S: FitnessSink + ?Sized>(
        &mut self,
        sink: &mut S,
    ) -> Result<EvolutionResult> {
        let result = self.evolve()?;
        if let Err(e) = sink.record(&result.fitness_log) {
            log::error!("failed to record fitness log: {}", e);
        }
        Ok(result)
    }

    fn run(&mut self) -> Result<EvolutionResult> {
        if self.population.is_empty() {
            self.initialize()?;
        }

        let offspring = self.config.offspring_count;
        let mut fitness_log = Vec::new();
        let mut reached_target = false;
        let mut generation = 0usize;

        while generation < self.config.max_iterations {
            let best = &self.population[0];
            log::info!(
                "Iteration: {} -- Fitness: {} genome: {}",
                generation,
                best.fitness(),
                best.genome()
            );
            fitness_log.push(best.fitness());

            if best.fitness() >= self.config.fitness_target {
                reached_target = true;
                break;
            }

            // Adjacent best-ranked pairs, read from the growing population.
            for k in 0..offspring {
                let mut child = combine_genome(
                    &self.population[k],
                    &self.population[k + 1],
                    &self.target,
                    &mut self.rng,
                )?;
                mutate_genome(
                    &mut child,
                    self.config.mutation_rate,
                    &self.target,
                    &mut self.rng,
                )?;
                self.population.push(child);
            }

            self.sort_population();
            self.population.truncate(self.config.population_size);

            generation += 1;
        }

        Ok(EvolutionResult {
            best: self.population[0].clone(),
            generations: fitness_log.len(),
            reached_target,
            fitness_log,
        })
    }

    fn initialize(&mut self) -> Result<()> {
        let len = self.target.len();
        let target = &self.target;
        let rng = &mut self.rng;
        self.population = (0..self.config.population_size)
            .map(|_| {
                let genome = random_genome(len, rng);
                let fitness = target.fitness(&genome)?;
                Ok(Individual::new(genome, fitness))
            })
            .collect::<Result<Vec<_>>>()?;
        self.sort_population();
        Ok(())
    }

    /// Stable sort, best first.
    fn sort_population(&mut self) {
        self.population.sort_by(Individual::rank_cmp);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn is_sorted(population: &[Individual]) -> bool {
        population
            .windows(2)
            .all(|w| w[0].fitness() >= w[1].fitness())
    }

    #[derive(Default)]
    struct MemorySink {
        records: Vec<Vec<f64>>,
    }

    impl FitnessSink for MemorySink {
        fn record(&mut self, fitness_log: &[f64]) -> io::Result<()> {
            self.records.push(fitness_log.to_vec());
            Ok(())
        }
    }

    struct FailingSink;

    impl FitnessSink for FailingSink {
        fn record(&mut self, _fitness_log: &[f64]) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = EdenConfig::new("abc")
            .with_population_size(5)
            .with_offspring_count(5);
        assert!(matches!(
            Eden::new(config),
            Err(EdenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_state_transitions() {
        let config = EdenConfig::new("ab").with_max_iterations(5).with_seed(1);
        let mut eden = Eden::new(config).unwrap();
        assert_eq!(eden.state(), EngineState::Uninitialized);
        assert!(eden.population().is_empty());

        eden.evolve().unwrap();
        assert_eq!(eden.state(), EngineState::Terminated);
        assert!(matches!(eden.evolve(), Err(EdenError::AlreadyEvolved)));
    }

    #[test]
    fn test_population_size_invariant() {
        let config = EdenConfig::new("population")
            .with_population_size(12)
            .with_offspring_count(7)
            .with_max_iterations(50)
            .with_seed(2);
        let mut eden = Eden::new(config).unwrap();
        eden.evolve().unwrap();
        assert_eq!(eden.population().len(), 12);
        assert!(is_sorted(eden.population()));
        assert!(eden
            .population()
            .iter()
            .all(|ind| ind.genome().chars().count() == 10));
    }

    #[test]
    fn test_log_length_matches_generations_on_cap() {
        let config = EdenConfig::new("a long target that will not be found")
            .with_max_iterations(30)
            .with_seed(3);
        let mut eden = Eden::new(config).unwrap();
        let result = eden.evolve().unwrap();
        assert!(!result.reached_target);
        assert_eq!(result.generations, 30);
        assert_eq!(result.fitness_log.len(), 30);
    }

    #[test]
    fn test_converges_on_short_target() {
        let config = EdenConfig::new("Hello")
            .with_max_iterations(100_000)
            .with_seed(4);
        let mut eden = Eden::new(config).unwrap();
        let result = eden.evolve().unwrap();
        assert!(result.reached_target);
        assert_eq!(result.best.genome(), "Hello");
        assert_eq!(result.best_fitness(), 1.0);
        assert_eq!(*result.fitness_log.last().unwrap(), result.best_fitness());
    }

    #[test]
    fn test_lower_fitness_target_stops_early() {
        let config = EdenConfig::new("abcdefghij")
            .with_fitness_target(0.0)
            .with_seed(5);
        let mut eden = Eden::new(config).unwrap();
        let result = eden.evolve().unwrap();
        assert!(result.reached_target);
        assert_eq!(result.generations, 1);
    }

    #[test]
    fn test_seeded_population_with_exact_match() {
        let mut genomes = vec!["xxx"; 9];
        genomes.push("ABC");
        let config = EdenConfig::new("ABC")
            .with_population_size(10)
            .with_offspring_count(4)
            .with_mutation_rate(0.0)
            .with_seed(6);
        let mut eden = Eden::with_population(config, genomes).unwrap();
        assert_eq!(eden.population()[0].genome(), "ABC");

        let result = eden.evolve().unwrap();
        assert!(result.reached_target);
        assert_eq!(result.fitness_log, vec![1.0]);
    }

    #[test]
    fn test_seeded_population_recombines_halves() {
        // "A" + "BC" splits at 1: "Axx" head with "xBC" tail gives "ABC".
        let mut genomes = vec!["Axx", "xBC"];
        genomes.extend(std::iter::repeat("yyy").take(8));
        let config = EdenConfig::new("ABC")
            .with_population_size(10)
            .with_offspring_count(4)
            .with_mutation_rate(0.0)
            .with_max_iterations(1_000)
            .with_seed(7);
        let mut eden = Eden::with_population(config, genomes).unwrap();
        let result = eden.evolve().unwrap();
        assert!(result.reached_target);
        assert_eq!(result.best.genome(), "ABC");
    }

    #[test]
    fn test_seeded_population_without_mutation_exhausts_cap() {
        let config = EdenConfig::new("ABC")
            .with_population_size(10)
            .with_offspring_count(4)
            .with_mutation_rate(0.0)
            .with_max_iterations(200)
            .with_seed(8);
        let mut eden = Eden::with_population(config, vec!["zzz"; 10]).unwrap();
        let result = eden.evolve().unwrap();
        assert!(!result.reached_target);
        assert_eq!(result.generations, 200);
        assert_eq!(result.best.genome(), "zzz");
    }

    #[test]
    fn test_seeded_population_length_mismatch() {
        let config = EdenConfig::new("ABC")
            .with_population_size(3)
            .with_offspring_count(1);
        let result = Eden::with_population(config, vec!["ABC", "AB", "ABC"]);
        assert!(matches!(
            result,
            Err(EdenError::LengthMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }

    #[test]
    fn test_seeded_population_wrong_count() {
        let config = EdenConfig::new("ABC")
            .with_population_size(3)
            .with_offspring_count(1);
        let result = Eden::with_population(config, vec!["ABC", "ABD"]);
        assert!(matches!(result, Err(EdenError::InvalidConfig(_))));
    }

    #[test]
    fn test_same_seed_same_run() {
        let config = EdenConfig::new("determinism")
            .with_max_iterations(40)
            .with_seed(9);
        let a = Eden::new(config.clone()).unwrap().evolve().unwrap();
        let b = Eden::new(config).unwrap().evolve().unwrap();
        assert_eq!(a.fitness_log, b.fitness_log);
        assert_eq!(a.best, b.best);
    }

    #[test]
    fn test_evolve_into_hands_log_to_sink() {
        let config = EdenConfig::new("sink").with_max_iterations(25).with_seed(10);
        let mut sink = MemorySink::default();
        let result = Eden::new(config)
            .unwrap()
            .evolve_into(&mut sink)
            .unwrap();
        assert_eq!(sink.records.len(), 1);
        assert_eq!(sink.records[0], result.fitness_log);
    }

    #[test]
    fn test_sink_failure_is_not_fatal() {
        let config = EdenConfig::new("Hi").with_max_iterations(10_000).with_seed(11);
        let result = Eden::new(config)
            .unwrap()
            .evolve_into(&mut FailingSink)
            .unwrap();
        assert!(!result.fitness_log.is_empty());
    }
}
