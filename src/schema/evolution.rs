//! Progress and result types reported by the evolution engine.

use serde::{Deserialize, Serialize};

use super::VisitOverlay;

/// Copy of a genome taken at the end of an evaluation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenomeSnapshot {
    /// Slot in the population the genome occupied.
    pub index: usize,
    /// Raw bits.
    pub bits: Vec<u8>,
    /// Decoded direction codes.
    pub directions: Vec<u32>,
    /// Fitness from the pass.
    pub fitness: f64,
    /// Generation the genome belongs to.
    pub generation: usize,
}

/// Progress update emitted after each epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Completed generation transitions.
    pub generation: usize,
    /// Index of the best genome within the population it was evaluated in.
    pub best_index: usize,
    /// Best fitness of the last evaluation pass.
    pub best_fitness: f64,
    /// Sum of fitness over the last evaluation pass.
    pub total_fitness: f64,
    /// Average fitness of the last evaluation pass.
    pub avg_fitness: f64,
    /// Whether a genome reached the end cell without revisits.
    pub solved: bool,
    /// Best genome of the last pass.
    pub best: Option<GenomeSnapshot>,
    /// Path walked by the best genome.
    pub trail: VisitOverlay,
}

/// Fitness history for plotting.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EvolutionHistory {
    /// Best fitness per evaluation pass.
    pub best_fitness: Vec<f64>,
    /// Average fitness per evaluation pass.
    pub avg_fitness: Vec<f64>,
    /// Mean Hamming distance to the best genome per evaluation pass.
    pub diversity: Vec<f64>,
}

/// Final result of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best genome of the last evaluation pass, if any pass ran.
    pub best: Option<GenomeSnapshot>,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis.
    pub history: EvolutionHistory,
}

/// Statistics from a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Completed generation transitions.
    pub generations: usize,
    /// Genome evaluations performed.
    pub total_evaluations: u64,
    /// Best fitness of the last evaluation pass.
    pub best_fitness: f64,
    /// Average fitness of the last evaluation pass.
    pub final_avg_fitness: f64,
    /// Time taken (in seconds).
    pub elapsed_seconds: f64,
    /// Reason for stopping.
    pub stop_reason: StopReason,
}

/// Reason a run stopped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StopReason {
    /// A genome reached maximum fitness.
    Solved,
    /// Reached the configured generation cap.
    MaxGenerations,
    /// Stop requested through the cancel handle.
    Cancelled,
}
