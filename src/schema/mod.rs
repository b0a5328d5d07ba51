//! Schema module - Configuration, maze and reporting types for GA runs.

mod config;
mod evolution;
mod maze;

pub use config::*;
pub use evolution::*;
pub use maze::*;
