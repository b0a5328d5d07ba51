//! Maze grid types and maze text parsing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// The 15x10 maze every run uses unless another one is supplied.
pub const REFERENCE_MAZE: &str = "\
111111111111111
101000001110001
300000001110001
100011100100001
100011100000101
110011100000101
100001000011101
101100010000002
101100010000001
111111111111111";

/// Static type of a maze cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellType {
    Floor,
    Wall,
    Start,
    End,
}

impl CellType {
    /// Parse a maze text digit.
    pub fn from_digit(c: char) -> Option<Self> {
        match c {
            '0' => Some(Self::Floor),
            '1' => Some(Self::Wall),
            '2' => Some(Self::Start),
            '3' => Some(Self::End),
            _ => None,
        }
    }

    #[inline]
    pub fn is_passable(self) -> bool {
        self != Self::Wall
    }
}

/// Grid coordinate. `x` grows east, `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance to another position.
    #[inline]
    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Movement direction encoded by genes `0..=3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Map a decoded gene to a direction. Codes outside `0..=3` have no direction.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            0 => Some(Self::North),
            1 => Some(Self::South),
            2 => Some(Self::East),
            3 => Some(Self::West),
            _ => None,
        }
    }

    pub fn code(self) -> u32 {
        match self {
            Self::North => 0,
            Self::South => 1,
            Self::East => 2,
            Self::West => 3,
        }
    }

    /// Unit step `(dx, dy)`.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
        }
    }
}

/// Immutable maze grid stored row-major in a flat buffer.
///
/// Construction guarantees exactly one start and one end cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<CellType>,
    start: Position,
    end: Position,
}

impl Grid {
    /// Build a grid from row-major cells.
    pub fn new(width: usize, height: usize, cells: Vec<CellType>) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::EmptyMaze);
        }
        if cells.len() != width * height {
            return Err(ConfigError::RaggedRow {
                row: cells.len() / width,
                expected: width,
                found: cells.len() % width,
            });
        }

        let mut start = None;
        let mut end = None;
        for (i, cell) in cells.iter().enumerate() {
            let pos = Position::new(i % width, i / width);
            match cell {
                CellType::Start if start.is_some() => return Err(ConfigError::DuplicateStart),
                CellType::Start => start = Some(pos),
                CellType::End if end.is_some() => return Err(ConfigError::DuplicateEnd),
                CellType::End => end = Some(pos),
                _ => {}
            }
        }

        Ok(Self {
            width,
            height,
            cells,
            start: start.ok_or(ConfigError::MissingStart)?,
            end: end.ok_or(ConfigError::MissingEnd)?,
        })
    }

    /// The built-in reference maze.
    pub fn reference() -> Self {
        match TextMazeSource::new(REFERENCE_MAZE).load() {
            Ok(grid) => grid,
            Err(e) => unreachable!("reference maze is malformed: {e}"),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn start(&self) -> Position {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Position {
        self.end
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Row-major index of a position.
    #[inline]
    pub fn index(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    #[inline]
    pub fn cell(&self, pos: Position) -> CellType {
        self.cells[self.index(pos)]
    }

    /// Neighbour of `pos` one step in `direction`, if it lies inside the grid.
    pub fn step(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        let x = pos.x.checked_add_signed(dx)?;
        let y = pos.y.checked_add_signed(dy)?;
        (x < self.width && y < self.height).then_some(Position::new(x, y))
    }
}

/// Per-evaluation scratch layer recording, for each cell left by an accepted
/// step, the direction code used to leave it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitOverlay {
    width: usize,
    height: usize,
    marks: Vec<Option<u32>>,
}

impl VisitOverlay {
    /// Empty overlay shaped like `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            width: grid.width(),
            height: grid.height(),
            marks: vec![None; grid.len()],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.marks.fill(None);
    }

    #[inline]
    pub fn get(&self, pos: Position) -> Option<u32> {
        self.marks[pos.y * self.width + pos.x]
    }

    /// Store `code` at `pos`. Returns true if the cell was already marked.
    #[inline]
    pub fn mark(&mut self, pos: Position, code: u32) -> bool {
        self.marks[pos.y * self.width + pos.x]
            .replace(code)
            .is_some()
    }

    /// Number of marked cells.
    pub fn visited(&self) -> usize {
        self.marks.iter().filter(|m| m.is_some()).count()
    }
}

/// Capability that produces a maze grid.
pub trait MazeSource {
    fn load(&self) -> Result<Grid, ConfigError>;
}

/// Parses the digit-per-cell maze text format.
///
/// ```text
/// 0 = floor, 1 = wall, 2 = start, 3 = end
/// ```
#[derive(Debug, Clone)]
pub struct TextMazeSource {
    text: String,
}

impl TextMazeSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read maze text from a file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Ok(Self::new(fs::read_to_string(path)?))
    }
}

impl MazeSource for TextMazeSource {
    fn load(&self) -> Result<Grid, ConfigError> {
        let rows: Vec<&str> = self
            .text
            .trim_end_matches(['\r', '\n'])
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .collect();

        let width = rows.first().map_or(0, |row| row.chars().count());
        if width == 0 {
            return Err(ConfigError::EmptyMaze);
        }

        let mut cells = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(ConfigError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }
            for (col, c) in line.chars().enumerate() {
                let cell = CellType::from_digit(c)
                    .ok_or(ConfigError::InvalidCell { row, col, found: c })?;
                cells.push(cell);
            }
        }

        log::trace!("Parsed maze of {}x{} cells", width, rows.len());
        Grid::new(width, rows.len(), cells)
    }
}
