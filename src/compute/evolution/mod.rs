//! Evolutionary search module for solving grid mazes.
//!
//! # Overview
//!
//! The search system consists of:
//!
//! - **Gene Codec** (`codec`): Bit strings to direction codes
//! - **Genome Operations** (`genome`): Random generation, crossover, and mutation
//! - **Fitness** (`fitness`): Walks a direction sequence through the maze
//! - **Search** (`search`): Generational GA with roulette wheel selection
//!
//! # Example
//!
//! ```rust,no_run
//! use maze_ga::compute::evolution::EvolutionEngine;
//! use maze_ga::schema::{GaConfig, Grid};
//!
//! let config = GaConfig {
//!     random_seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let mut engine = EvolutionEngine::new(config, Grid::reference()).unwrap();
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {:.3}",
//!         progress.generation, progress.best_fitness);
//! });
//!
//! println!("Stopped: {:?}", result.stats.stop_reason);
//! ```

mod codec;
mod fitness;
mod genome;
mod search;

pub use codec::{GeneCodec, decode};
pub use fitness::{MAX_FITNESS, MazeEvaluator};
pub use genome::{Genome, GenomeRng, hamming_distance};
pub use search::{EpochOutcome, EvolutionEngine, roulette_pick};
