//! Compute module - Genome decoding, maze simulation and the GA loop.

pub mod evolution;

pub use evolution::{EvolutionEngine, MazeEvaluator};
