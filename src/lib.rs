//! Maze GA - A canonical genetic algorithm that evolves a path through a grid maze.
//!
//! Genomes are fixed-length bit strings. Every `gene_length` bits decode to a
//! direction code (North, South, East, West); the sequence is walked through the
//! maze and scored by how close it ends to the exit, minus a penalty for
//! revisiting cells.
//!
//! # Architecture
//!
//! The crate is split into three modules:
//!
//! - `schema`: Configuration, maze grid and progress/result types
//! - `compute`: Gene codec, maze evaluator and the evolution engine
//! - `render`: Text rendering of a maze and a walked path
//!
//! # Example
//!
//! ```rust,no_run
//! use maze_ga::{
//!     compute::EvolutionEngine,
//!     render::ConsoleRenderer,
//!     schema::{GaConfig, Grid},
//! };
//!
//! let mut engine = EvolutionEngine::new(GaConfig::default(), Grid::reference()).unwrap();
//! let result = engine.run();
//!
//! let evaluator = engine.evaluator();
//! print!("{}", ConsoleRenderer.render_to_string(evaluator.grid(), evaluator.overlay()));
//! println!("Generations: {}", result.stats.generations);
//! ```

pub mod compute;
pub mod render;
pub mod schema;

// Re-export commonly used types
pub use compute::{EvolutionEngine, MazeEvaluator};
pub use render::{ConsoleRenderer, MazeRenderer};
pub use schema::{ConfigError, GaConfig, Grid, RunConfig};
