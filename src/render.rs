//! Text rendering of a maze and the path walked by a genome.
//!
//! ```text
//! .  floor      #  wall      >  start      @  end
//! ↑ ↓ → ←  direction used to leave a visited cell
//! ?  any other stored overlay value
//! ```

use std::io::{self, Write};

use crate::schema::{CellType, Direction, Grid, Position, VisitOverlay};

/// Capability that draws a grid with its visit overlay.
pub trait MazeRenderer {
    fn render(&self, grid: &Grid, overlay: &VisitOverlay, out: &mut dyn Write) -> io::Result<()>;
}

/// One character per cell, one line per row.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    /// Render into a string.
    pub fn render_to_string(&self, grid: &Grid, overlay: &VisitOverlay) -> String {
        let mut buf = Vec::with_capacity((grid.width() + 1) * grid.height() * 3);
        // Writing into a Vec cannot fail.
        let _ = self.render(grid, overlay, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl MazeRenderer for ConsoleRenderer {
    fn render(&self, grid: &Grid, overlay: &VisitOverlay, out: &mut dyn Write) -> io::Result<()> {
        let mut line = String::with_capacity(grid.width() * 3);
        for y in 0..grid.height() {
            line.clear();
            for x in 0..grid.width() {
                let pos = Position::new(x, y);
                let c = match overlay.get(pos) {
                    Some(code) => trail_char(code),
                    None => cell_char(grid.cell(pos)),
                };
                line.push(c);
            }
            writeln!(out, "{line}")?;
        }
        Ok(())
    }
}

fn cell_char(cell: CellType) -> char {
    match cell {
        CellType::Floor => '.',
        CellType::Wall => '#',
        CellType::Start => '>',
        CellType::End => '@',
    }
}

fn trail_char(code: u32) -> char {
    match Direction::from_code(code) {
        Some(Direction::North) => '↑',
        Some(Direction::South) => '↓',
        Some(Direction::East) => '→',
        Some(Direction::West) => '←',
        None => '?',
    }
}
