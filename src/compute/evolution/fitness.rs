//! Maze fitness evaluation.
//!
//! A decoded genome is walked through the maze from the start cell. Moves that
//! leave the grid or hit a wall are dropped; accepted moves are recorded on the
//! visit overlay. Fitness is `1 / (distance + revisits + 1)` where `distance` is
//! the Manhattan distance from the final cell to the end cell.

use crate::schema::{Direction, Grid, Position, VisitOverlay};

/// Highest attainable fitness: end cell reached without revisits.
pub const MAX_FITNESS: f64 = 1.0;

/// Simulates direction sequences against a fixed maze.
#[derive(Debug, Clone)]
pub struct MazeEvaluator {
    grid: Grid,
    overlay: VisitOverlay,
    last_position: Position,
    last_penalty: usize,
}

impl MazeEvaluator {
    /// Create an evaluator that owns `grid`.
    pub fn new(grid: Grid) -> Self {
        let overlay = VisitOverlay::for_grid(&grid);
        let last_position = grid.start();
        Self {
            grid,
            overlay,
            last_position,
            last_penalty: 0,
        }
    }

    /// Walk `codes` from the start cell and score the final position.
    ///
    /// Never fails: unknown codes, out-of-bounds moves and wall hits are
    /// skipped without touching the overlay.
    pub fn evaluate<I>(&mut self, codes: I) -> f64
    where
        I: IntoIterator<Item = u32>,
    {
        self.overlay.clear();
        let mut pos = self.grid.start();
        let mut penalty = 0usize;

        for code in codes {
            let Some(direction) = Direction::from_code(code) else {
                continue;
            };
            let Some(next) = self.grid.step(pos, direction) else {
                continue;
            };
            if !self.grid.cell(next).is_passable() {
                continue;
            }

            if self.overlay.mark(pos, code) {
                penalty += 1;
            }
            pos = next;
        }

        self.last_position = pos;
        self.last_penalty = penalty;

        let distance = pos.manhattan(self.grid.end());
        1.0 / (distance + penalty + 1) as f64
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Overlay written by the most recent evaluation.
    #[inline]
    pub fn overlay(&self) -> &VisitOverlay {
        &self.overlay
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.grid.start()
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.grid.end()
    }

    /// Final cell of the most recent evaluation.
    #[inline]
    pub fn last_position(&self) -> Position {
        self.last_position
    }

    /// Revisit count of the most recent evaluation.
    #[inline]
    pub fn last_penalty(&self) -> usize {
        self.last_penalty
    }
}
