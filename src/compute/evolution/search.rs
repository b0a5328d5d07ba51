//! Canonical generational genetic algorithm over maze genomes.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use log::{debug, info};

use crate::schema::{
    ConfigError, EvolutionHistory, EvolutionProgress, EvolutionResult, EvolutionStats, GaConfig,
    GenomeSnapshot, Grid, StopReason,
};

use super::codec::GeneCodec;
use super::fitness::{MAX_FITNESS, MazeEvaluator};
use super::genome::{Genome, GenomeRng, hamming_distance};

/// What a single epoch did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EpochOutcome {
    /// The population was replaced by offspring.
    Advanced,
    /// A perfect genome was found; the population was left in place.
    Solved,
}

/// Evolution engine that runs the search.
pub struct EvolutionEngine {
    config: GaConfig,
    codec: GeneCodec,
    rng: GenomeRng,
    evaluator: MazeEvaluator,
    population: Vec<Genome>,
    generation: usize,
    fittest: usize,
    best_fitness: f64,
    total_fitness: f64,
    searching: bool,
    best: Option<GenomeSnapshot>,
    history: EvolutionHistory,
    evaluations: u64,
    cancelled: Arc<AtomicBool>,
}

impl EvolutionEngine {
    /// Validate `config`, take ownership of `grid` and create generation 0.
    pub fn new(config: GaConfig, grid: Grid) -> Result<Self, ConfigError> {
        config.validate()?;
        let codec = GeneCodec::new(config.gene_length)?;
        let rng = match config.random_seed {
            Some(seed) => GenomeRng::new(seed),
            None => GenomeRng::random(),
        };

        let mut engine = Self {
            population: Vec::with_capacity(config.population_size),
            config,
            codec,
            rng,
            evaluator: MazeEvaluator::new(grid),
            generation: 0,
            fittest: 0,
            best_fitness: 0.0,
            total_fitness: 0.0,
            searching: true,
            best: None,
            history: EvolutionHistory::default(),
            evaluations: 0,
            cancelled: Arc::new(AtomicBool::new(false)),
        };
        engine.initialize();
        Ok(engine)
    }

    /// Get cancellation handle. Honoured between epochs only.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancelled)
    }

    /// Fill the population with uniformly random genomes.
    pub fn initialize(&mut self) {
        self.population.clear();
        self.generation = 0;
        self.fittest = 0;
        self.best_fitness = 0.0;
        self.total_fitness = 0.0;
        self.searching = true;
        self.best = None;
        self.history = EvolutionHistory::default();

        for _ in 0..self.config.population_size {
            let genome = self.rng.random_genome(self.config.chromosome_length);
            self.population.push(genome);
        }
    }

    /// Score the population in order.
    ///
    /// Stops at the first genome with maximum fitness; genomes after it keep
    /// whatever fitness they already had.
    pub fn evaluate_generation(&mut self) {
        self.total_fitness = 0.0;
        self.fittest = 0;
        self.best_fitness = 0.0;

        for (i, genome) in self.population.iter_mut().enumerate() {
            let fitness = self.evaluator.evaluate(self.codec.genes(&genome.bits));
            self.evaluations += 1;

            genome.fitness = fitness;
            self.total_fitness += fitness;
            if fitness > self.best_fitness {
                self.best_fitness = fitness;
                self.fittest = i;
            }
            if fitness >= MAX_FITNESS {
                self.searching = false;
                break;
            }
        }

        // Replay the best genome so the overlay shows its path.
        let best = &self.population[self.fittest];
        self.evaluator.evaluate(self.codec.genes(&best.bits));
        self.best = Some(GenomeSnapshot {
            index: self.fittest,
            bits: best.bits.clone(),
            directions: self.codec.genes(&best.bits).collect(),
            fitness: best.fitness,
            generation: self.generation,
        });

        let avg_fitness = self.total_fitness / self.population.len() as f64;
        let diversity = self
            .population
            .iter()
            .map(|g| hamming_distance(&g.bits, &best.bits) as f64)
            .sum::<f64>()
            / self.population.len() as f64;

        self.history.best_fitness.push(self.best_fitness);
        self.history.avg_fitness.push(avg_fitness);
        self.history.diversity.push(diversity);

        debug!(
            "Gen {}: best={:.4} (#{}) avg={:.4} diversity={:.1} end={:?}",
            self.generation,
            self.best_fitness,
            self.fittest,
            avg_fitness,
            diversity,
            self.evaluator.last_position()
        );
    }

    /// Roulette wheel selection. Returns index 0 without drawing when the
    /// population has no fitness.
    pub fn select_index(&mut self) -> usize {
        if self.total_fitness <= 0.0 {
            return 0;
        }
        let slice = self.rng.unit() * self.total_fitness;
        roulette_pick(&self.population, slice)
    }

    /// Evaluate, then breed a full replacement population unless solved.
    pub fn epoch(&mut self) -> EpochOutcome {
        self.evaluate_generation();
        if !self.searching {
            return EpochOutcome::Solved;
        }

        let size = self.config.population_size;
        let mut offspring = Vec::with_capacity(size);

        while offspring.len() < size {
            let mum = self.select_index();
            let dad = self.select_index();

            let (mut baby1, mut baby2) = self.rng.crossover(
                &self.population[mum].bits,
                &self.population[dad].bits,
                self.config.crossover_rate,
            );

            self.rng.mutate(&mut baby1, self.config.mutation_rate);
            self.rng.mutate(&mut baby2, self.config.mutation_rate);

            offspring.push(Genome::new(baby1));
            offspring.push(Genome::new(baby2));
        }

        self.population = offspring;
        self.generation += 1;
        EpochOutcome::Advanced
    }

    /// Check if the run should stop before the next epoch.
    fn should_stop(&self) -> Option<StopReason> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Some(StopReason::Cancelled);
        }

        if let Some(limit) = self.config.max_generations
            && self.generation >= limit
        {
            return Some(StopReason::MaxGenerations);
        }

        None
    }

    /// Get current progress.
    pub fn progress(&self) -> EvolutionProgress {
        EvolutionProgress {
            generation: self.generation,
            best_index: self.fittest,
            best_fitness: self.best_fitness,
            total_fitness: self.total_fitness,
            avg_fitness: self.total_fitness / self.population.len().max(1) as f64,
            solved: !self.searching,
            best: self.best.clone(),
            trail: self.evaluator.overlay().clone(),
        }
    }

    /// Run epochs until solved, cancelled or capped, reporting after each one.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> EvolutionResult
    where
        F: FnMut(&EvolutionProgress),
    {
        let start_time = std::time::Instant::now();
        info!(
            "Searching with {} genomes of {} genes",
            self.config.population_size,
            self.config.genes_per_genome()
        );

        let stop_reason = loop {
            if let Some(reason) = self.should_stop() {
                break reason;
            }

            let outcome = self.epoch();
            callback(&self.progress());

            if outcome == EpochOutcome::Solved {
                break StopReason::Solved;
            }
        };

        match stop_reason {
            StopReason::Solved => info!("Solved at generation {}", self.generation),
            StopReason::MaxGenerations => info!(
                "Stopped at generation cap {} (best {:.4})",
                self.generation, self.best_fitness
            ),
            StopReason::Cancelled => info!("Cancelled at generation {}", self.generation),
        }

        let final_avg_fitness = self.history.avg_fitness.last().copied().unwrap_or(0.0);

        EvolutionResult {
            best: self.best.clone(),
            stats: EvolutionStats {
                generations: self.generation,
                total_evaluations: self.evaluations,
                best_fitness: self.best_fitness,
                final_avg_fitness,
                elapsed_seconds: start_time.elapsed().as_secs_f64(),
                stop_reason,
            },
            history: self.history.clone(),
        }
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_callback(|_| {})
    }

    /// Current population.
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    /// Completed generation transitions.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Best genome of the last evaluation pass.
    pub fn fittest(&self) -> Option<&GenomeSnapshot> {
        self.best.as_ref()
    }

    pub fn best_fitness(&self) -> f64 {
        self.best_fitness
    }

    /// False once a genome has reached maximum fitness.
    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// Per-pass fitness and diversity history.
    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    pub fn evaluator(&self) -> &MazeEvaluator {
        &self.evaluator
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }
}

/// Index of the first genome whose cumulative fitness exceeds `slice`.
pub fn roulette_pick(population: &[Genome], slice: f64) -> usize {
    let mut cumulative = 0.0;
    for (i, genome) in population.iter().enumerate() {
        cumulative += genome.fitness;
        if cumulative > slice {
            return i;
        }
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{MazeSource, TextMazeSource};

    /// The start cell is boxed in, so every genome scores 1/4.
    fn sealed_maze() -> Grid {
        TextMazeSource::new("2103").load().unwrap()
    }

    fn small_config(seed: u64) -> GaConfig {
        GaConfig {
            population_size: 10,
            chromosome_length: 16,
            gene_length: 2,
            random_seed: Some(seed),
            ..Default::default()
        }
    }

    fn genome(bits: &[u8], fitness: f64) -> Genome {
        Genome {
            bits: bits.to_vec(),
            fitness,
        }
    }

    #[test]
    fn test_engine_creation() {
        let engine = EvolutionEngine::new(small_config(1), sealed_maze()).unwrap();

        assert_eq!(engine.population().len(), 10);
        assert!(engine.population().iter().all(|g| g.len() == 16));
        assert_eq!(engine.generation(), 0);
        assert!(engine.is_searching());
        assert!(engine.fittest().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GaConfig {
            population_size: 9,
            ..small_config(1)
        };
        assert!(matches!(
            EvolutionEngine::new(config, sealed_maze()),
            Err(ConfigError::OddPopulation(9))
        ));

        let config = GaConfig {
            chromosome_length: 15,
            ..small_config(1)
        };
        assert!(EvolutionEngine::new(config, sealed_maze()).is_err());
    }

    #[test]
    fn test_roulette_pick_fixed_draw() {
        let population = vec![genome(&[0], 0.25), genome(&[1], 0.75)];
        assert_eq!(roulette_pick(&population, 0.5), 1);
        assert_eq!(roulette_pick(&population, 0.1), 0);
        assert_eq!(roulette_pick(&population, 0.25), 1);
    }

    #[test]
    fn test_select_without_fitness_skips_draw() {
        let mut a = EvolutionEngine::new(small_config(5), sealed_maze()).unwrap();
        let mut b = EvolutionEngine::new(small_config(5), sealed_maze()).unwrap();

        assert_eq!(a.select_index(), 0);
        assert_eq!(a.rng.unit(), b.rng.unit());
    }

    #[test]
    fn test_epoch_preserves_population_size() {
        let mut engine = EvolutionEngine::new(small_config(3), sealed_maze()).unwrap();

        for expected in 1..=20 {
            assert_eq!(engine.epoch(), EpochOutcome::Advanced);
            assert_eq!(engine.population().len(), 10);
            assert_eq!(engine.generation(), expected);
        }
    }

    #[test]
    fn test_offspring_are_parent_copies_without_operators() {
        let config = GaConfig {
            crossover_rate: 0.0,
            mutation_rate: 0.0,
            ..small_config(8)
        };
        let mut engine = EvolutionEngine::new(config, sealed_maze()).unwrap();
        let parents: Vec<Vec<u8>> = engine.population().iter().map(|g| g.bits.clone()).collect();

        engine.epoch();
        for child in engine.population() {
            assert!(parents.contains(&child.bits));
            assert_eq!(child.fitness, 0.0);
        }
    }

    #[test]
    fn test_early_exit_keeps_stale_fitness() {
        let grid = TextMazeSource::new("23").load().unwrap();
        let config = GaConfig {
            population_size: 4,
            chromosome_length: 2,
            gene_length: 2,
            random_seed: Some(1),
            ..Default::default()
        };
        let mut engine = EvolutionEngine::new(config, grid).unwrap();
        engine.population = vec![
            genome(&[0, 0], 0.0),
            genome(&[1, 0], 0.0),
            genome(&[1, 0], 0.123),
            genome(&[1, 1], 0.456),
        ];

        engine.evaluate_generation();

        assert!(!engine.is_searching());
        assert_eq!(engine.population[0].fitness, 0.5);
        assert_eq!(engine.population[1].fitness, MAX_FITNESS);
        assert_eq!(engine.population[2].fitness, 0.123);
        assert_eq!(engine.population[3].fitness, 0.456);
        assert_eq!(engine.progress().best_index, 1);
        assert_eq!(engine.progress().total_fitness, 1.5);
        assert_eq!(engine.fittest().unwrap().directions, vec![2]);
    }

    #[test]
    fn test_ties_keep_earliest_index() {
        let grid = TextMazeSource::new("2003").load().unwrap();
        let config = GaConfig {
            population_size: 2,
            chromosome_length: 2,
            gene_length: 2,
            random_seed: Some(1),
            ..Default::default()
        };
        let mut engine = EvolutionEngine::new(config, grid).unwrap();
        engine.population = vec![genome(&[0, 0], 0.0), genome(&[0, 0], 0.0)];

        engine.evaluate_generation();
        assert_eq!(engine.progress().best_index, 0);
        assert_eq!(engine.best_fitness(), 0.25);
        assert!(engine.is_searching());
    }

    #[test]
    fn test_solved_epoch_keeps_population() {
        let grid = TextMazeSource::new("23").load().unwrap();
        let config = GaConfig {
            population_size: 2,
            chromosome_length: 2,
            gene_length: 2,
            random_seed: Some(1),
            ..Default::default()
        };
        let mut engine = EvolutionEngine::new(config, grid).unwrap();
        engine.population = vec![genome(&[1, 1], 0.0), genome(&[1, 0], 0.0)];

        assert_eq!(engine.epoch(), EpochOutcome::Solved);
        assert_eq!(engine.generation(), 0);
        assert_eq!(engine.population()[1].bits, vec![1, 0]);
        assert!(engine.progress().solved);
    }

    #[test]
    fn test_same_seed_reproducible() {
        let config = GaConfig {
            max_generations: Some(8),
            ..small_config(99)
        };
        let mut a = EvolutionEngine::new(config.clone(), sealed_maze()).unwrap();
        let mut b = EvolutionEngine::new(config, sealed_maze()).unwrap();

        a.run();
        b.run();

        assert_eq!(a.population(), b.population());
        assert_eq!(a.history().diversity, b.history().diversity);
    }

    #[test]
    fn test_generation_cap() {
        let config = GaConfig {
            max_generations: Some(5),
            ..small_config(2)
        };
        let mut engine = EvolutionEngine::new(config, sealed_maze()).unwrap();

        let mut reports = 0;
        let result = engine.run_with_callback(|_| reports += 1);

        assert_eq!(result.stats.stop_reason, StopReason::MaxGenerations);
        assert_eq!(result.stats.generations, 5);
        assert_eq!(result.stats.total_evaluations, 50);
        assert_eq!(reports, 5);
        assert_eq!(result.history.best_fitness.len(), 5);
        assert_eq!(result.stats.best_fitness, 0.25);
    }

    #[test]
    fn test_cancellation() {
        let mut engine = EvolutionEngine::new(small_config(4), sealed_maze()).unwrap();
        let cancel = engine.cancel_handle();

        // Cancel immediately
        cancel.store(true, Ordering::Relaxed);

        let result = engine.run_with_callback(|_| panic!("no epoch expected"));
        assert_eq!(result.stats.stop_reason, StopReason::Cancelled);
        assert_eq!(result.stats.generations, 0);
        assert!(result.best.is_none());
    }

    #[test]
    fn test_cancel_between_epochs() {
        let mut engine = EvolutionEngine::new(small_config(6), sealed_maze()).unwrap();
        let cancel = engine.cancel_handle();

        let result = engine.run_with_callback(|progress| {
            if progress.generation == 3 {
                cancel.store(true, Ordering::Relaxed);
            }
        });

        assert_eq!(result.stats.stop_reason, StopReason::Cancelled);
        assert_eq!(result.stats.generations, 3);
        assert_eq!(engine.population().len(), 10);
    }

    #[test]
    fn test_solves_reference_maze() {
        let config = GaConfig {
            crossover_rate: 0.7,
            mutation_rate: 0.02,
            population_size: 200,
            chromosome_length: 70,
            gene_length: 2,
            random_seed: Some(7),
            max_generations: Some(5000),
        };
        let mut engine = EvolutionEngine::new(config, Grid::reference()).unwrap();

        let mut reports = 0usize;
        let result = engine.run_with_callback(|_| reports += 1);

        assert_eq!(result.stats.stop_reason, StopReason::Solved);
        assert_eq!(reports, result.stats.generations + 1);

        let best = result.best.unwrap();
        assert_eq!(best.fitness, MAX_FITNESS);
        assert_eq!(best.directions.len(), 35);
        assert_eq!(engine.population()[best.index].bits, best.bits);

        let mut evaluator = MazeEvaluator::new(Grid::reference());
        assert_eq!(evaluator.evaluate(best.directions.iter().copied()), MAX_FITNESS);
        assert_eq!(engine.progress().trail, *evaluator.overlay());
    }
}
