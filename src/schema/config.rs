//! Configuration types for genetic algorithm runs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Largest supported gene width in bits.
pub const MAX_GENE_LENGTH: usize = 16;

/// Genetic algorithm parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaConfig {
    /// Probability that a selected pair is recombined (0.0-1.0).
    #[serde(default = "default_crossover_rate")]
    pub crossover_rate: f64,
    /// Per-bit flip probability (0.0-1.0).
    #[serde(default = "default_mutation_rate")]
    pub mutation_rate: f64,
    /// Number of genomes per generation. Must be positive and even.
    #[serde(default = "default_population_size")]
    pub population_size: usize,
    /// Bits per genome. Must be a multiple of `gene_length`.
    #[serde(default = "default_chromosome_length")]
    pub chromosome_length: usize,
    /// Bits per decoded direction code.
    #[serde(default = "default_gene_length")]
    pub gene_length: usize,
    /// Random seed for reproducibility.
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Optional cap on completed generations.
    #[serde(default)]
    pub max_generations: Option<usize>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            crossover_rate: default_crossover_rate(),
            mutation_rate: default_mutation_rate(),
            population_size: default_population_size(),
            chromosome_length: default_chromosome_length(),
            gene_length: default_gene_length(),
            random_seed: None,
            max_generations: None,
        }
    }
}

fn default_crossover_rate() -> f64 {
    0.7
}
fn default_mutation_rate() -> f64 {
    0.001
}
fn default_population_size() -> usize {
    140
}
fn default_chromosome_length() -> usize {
    70
}
fn default_gene_length() -> usize {
    2
}

impl GaConfig {
    /// Number of direction codes carried by each genome.
    #[inline]
    pub fn genes_per_genome(&self) -> usize {
        self.chromosome_length / self.gene_length.max(1)
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_rate("crossover_rate", self.crossover_rate)?;
        check_rate("mutation_rate", self.mutation_rate)?;

        if self.population_size == 0 {
            return Err(ConfigError::PopulationTooSmall);
        }
        if self.population_size % 2 != 0 {
            return Err(ConfigError::OddPopulation(self.population_size));
        }
        if self.gene_length == 0 || self.gene_length > MAX_GENE_LENGTH {
            return Err(ConfigError::InvalidGeneLength(self.gene_length));
        }
        if self.chromosome_length == 0 || self.chromosome_length % self.gene_length != 0 {
            return Err(ConfigError::ChromosomeLengthMismatch {
                chromosome_length: self.chromosome_length,
                gene_length: self.gene_length,
            });
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

/// Top-level configuration for the command line runner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Genetic algorithm parameters.
    #[serde(default)]
    pub ga: GaConfig,
    /// Maze text file. Uses the built-in reference maze when absent.
    #[serde(default)]
    pub maze_file: Option<PathBuf>,
    /// Render the best path every N generations (0 = never).
    #[serde(default = "default_render_every")]
    pub render_every: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            ga: GaConfig::default(),
            maze_file: None,
            render_every: default_render_every(),
        }
    }
}

fn default_render_every() -> usize {
    1
}

impl RunConfig {
    /// Load and validate a JSON run configuration.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: RunConfig = serde_json::from_str(&content)?;
        config.ga.validate()?;
        Ok(config)
    }
}

/// Fatal configuration errors. None of these can occur once a run has started.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be within [0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f64 },
    #[error("Population size must be non-zero")]
    PopulationTooSmall,
    #[error("Population size must be even, got {0}")]
    OddPopulation(usize),
    #[error("Gene length must be between 1 and 16, got {0}")]
    InvalidGeneLength(usize),
    #[error(
        "Chromosome length {chromosome_length} is not a positive multiple of gene length {gene_length}"
    )]
    ChromosomeLengthMismatch {
        chromosome_length: usize,
        gene_length: usize,
    },
    #[error("Maze text is empty")]
    EmptyMaze,
    #[error("Maze row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("Invalid maze cell {found:?} at row {row}, column {col}")]
    InvalidCell { row: usize, col: usize, found: char },
    #[error("Maze has no start cell")]
    MissingStart,
    #[error("Maze has more than one start cell")]
    DuplicateStart,
    #[error("Maze has no end cell")]
    MissingEnd,
    #[error("Maze has more than one end cell")]
    DuplicateEnd,
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}
