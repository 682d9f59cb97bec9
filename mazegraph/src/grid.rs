use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Classification of a single pixel of a maze image
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    Wall,
    Path,
    /// Any color that is neither pure white nor pure black
    Other([u8; 4]),
}

impl Default for Cell {
    fn default() -> Self {
        Self::Wall
    }
}

impl Cell {
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        // alpha is ignored, an opaque read of the pixel decides
        match [rgba[0], rgba[1], rgba[2]] {
            [255, 255, 255] => Cell::Path,
            [0, 0, 0] => Cell::Wall,
            _ => Cell::Other(rgba),
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Wall => "X",
                Cell::Path => " ",
                Cell::Other(_) => "?",
            }
        )
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Direction::Up => "up",
                Direction::Down => "down",
                Direction::Left => "left",
                Direction::Right => "right",
            }
        )
    }
}

/// A pixel coordinate, x is the column and y the row
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: usize,
    pub y: usize,
}

impl Point {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// The point one step in the given direction, `None` when that would underflow
    pub fn step(self, direction: Direction) -> Option<Point> {
        Some(match direction {
            Direction::Up => Point::new(self.x, self.y.checked_sub(1)?),
            Direction::Down => Point::new(self.x, self.y + 1),
            Direction::Left => Point::new(self.x.checked_sub(1)?, self.y),
            Direction::Right => Point::new(self.x + 1, self.y),
        })
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Read-only access to a rectangular field of classified pixels
pub trait Grid {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    /// Bounds checked lookup, `None` outside of the grid
    fn cell(&self, point: Point) -> Option<Cell>;

    fn is_valid(&self, point: Point) -> bool {
        point.x < self.width() && point.y < self.height()
    }

    fn is_path(&self, point: Point) -> bool {
        self.cell(point) == Some(Cell::Path)
    }

    /// The neighbor in the given direction if it is inside the grid
    fn neighbor(&self, point: Point, direction: Direction) -> Option<Point> {
        point.step(direction).filter(|p| self.is_valid(*p))
    }
}

/// A Grid implementation that uses a rectangular grid of cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMap {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl GridMap {
    /// Creates a map where every cell is a wall
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![Cell::Wall; columns]; rows],
        }
    }

    /// Parses a map from text, `#` is a wall, `.` or space is a path and anything else is an
    /// unknown color. Lines must all have the same length.
    pub fn from_ascii(text: &str) -> Self {
        let cells: Vec<Vec<Cell>> = text
            .lines()
            .map(str::trim_end)
            .filter(|l| !l.is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        '#' => Cell::Wall,
                        '.' | ' ' => Cell::Path,
                        _ => Cell::Other([255, 0, 0, 255]),
                    })
                    .collect()
            })
            .collect();

        Self {
            rows: cells.len(),
            columns: cells.first().map_or(0, Vec::len),
            cells,
        }
    }

    pub fn set(&mut self, point: Point, cell: Cell) {
        self.cells[point.y][point.x] = cell;
    }
}

impl Grid for GridMap {
    fn width(&self) -> usize {
        self.columns
    }

    fn height(&self) -> usize {
        self.rows
    }

    fn cell(&self, point: Point) -> Option<Cell> {
        self.cells.get(point.y)?.get(point.x).copied()
    }
}

impl Display for GridMap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
