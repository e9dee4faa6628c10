//! Grid model for the maze.
//!
//! This module contains the cell grid the maze is carved into: integer positions, the four
//! cardinal directions, the per-cell wall bitset and the neighbour queries the generators and the
//! movement state machine rely on.

use color_eyre::eyre::{ensure, Result};

/// Logical coordinates of a cell.
///
/// The origin is the top-left cell; `x` grows eastward and `y` grows southward.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Column of the cell.
    pub x: u16,
    /// Row of the cell.
    pub y: u16,
}

impl Position {
    /// Builds a position from its column and row.
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Returns the position one step away in `direction`, if it does not underflow or overflow
    /// the coordinate type. Grid bounds are not checked here.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (x, y) = match direction {
            Direction::North => (Some(self.x), self.y.checked_sub(1)),
            Direction::East => (self.x.checked_add(1), Some(self.y)),
            Direction::South => (Some(self.x), self.y.checked_add(1)),
            Direction::West => (self.x.checked_sub(1), Some(self.y)),
        };

        match (x, y) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

/// Cardinal directions, in the order the generators scan neighbours.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards decreasing `y`.
    North,
    /// Towards increasing `x`.
    East,
    /// Towards increasing `y`.
    South,
    /// Towards decreasing `x`.
    West,
}

impl Direction {
    /// All four directions, north first and then clockwise.
    pub const ALL: [Self; 4] = [Self::North, Self::East, Self::South, Self::West];

    /// Returns the direction facing the other way.
    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// Derives the direction leading from `from` to an orthogonally adjacent `to`.
    ///
    /// Exactly one of the four unit deltas applies to adjacent cells; any other pair of positions
    /// yields [`None`].
    pub fn between(from: Position, to: Position) -> Option<Self> {
        if from.x == to.x {
            if from.y.checked_sub(1) == Some(to.y) {
                return Some(Self::North);
            }
            if from.y.checked_add(1) == Some(to.y) {
                return Some(Self::South);
            }
        } else if from.y == to.y {
            if from.x.checked_add(1) == Some(to.x) {
                return Some(Self::East);
            }
            if from.x.checked_sub(1) == Some(to.x) {
                return Some(Self::West);
            }
        }

        None
    }

    /// Bit representing the wall on this side in a [`Walls`] set.
    const fn bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::East => 0b0010,
            Self::South => 0b0100,
            Self::West => 0b1000,
        }
    }
}

/// Set of closed walls around a single cell.
///
/// Stored as a 4-bit set indexed by [`Direction`]; a set bit means the wall on that side is still
/// standing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Walls(u8);

impl Default for Walls {
    fn default() -> Self {
        Self::CLOSED
    }
}

impl Walls {
    /// All four walls standing.
    pub const CLOSED: Self = Self(0b1111);

    /// Returns `true` if the wall on the `direction` side has been carved away.
    pub const fn is_open(self, direction: Direction) -> bool {
        self.0 & direction.bit() == 0
    }

    /// Returns the number of open sides.
    pub const fn open_count(self) -> u32 {
        4 - self.0.count_ones()
    }

    /// Removes the wall on the `direction` side.
    fn open(&mut self, direction: Direction) {
        self.0 &= !direction.bit();
    }
}

/// Single cell of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    /// Walls still standing around the cell.
    walls: Walls,
    /// Generation scratch flag; carries no meaning once a maze is complete.
    visited: bool,
}

impl Cell {
    /// Returns the wall set of the cell.
    pub const fn walls(&self) -> Walls {
        self.walls
    }
}

/// Fixed-size two-dimensional grid of cells.
///
/// This structure owns every cell of the maze. Walls are only ever opened in pairs through
/// [`Grid::carve`], so the wall on either side of a shared edge always agrees.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: u16,
    /// Number of rows.
    height: u16,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every wall closed.
    ///
    /// # Errors
    ///
    /// This function returns an error if either dimension is zero.
    pub fn new(width: u16, height: u16) -> Result<Self> {
        ensure!(width >= 1, "grid width must be at least 1");
        ensure!(height >= 1, "grid height must be at least 1");

        Ok(Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        })
    }

    /// Returns the number of columns.
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Returns the number of rows.
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Returns the total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the grid has no cells, which construction rules out.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns `true` if `position` lies inside the grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.width && position.y < self.height
    }

    /// Returns the cell at `position`, if it lies inside the grid.
    pub fn cell(&self, position: Position) -> Option<&Cell> {
        self.index(position).and_then(|idx| self.cells.get(idx))
    }

    /// Iterates over every position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Position::new(x, y)))
    }

    /// Returns the in-bounds neighbour of `position` in `direction`.
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position
            .step(direction)
            .filter(|next| self.contains(position) && self.contains(*next))
    }

    /// Iterates over the in-bounds neighbours of `position` with the direction leading to each.
    pub fn neighbors(
        &self,
        position: Position,
    ) -> impl Iterator<Item = (Direction, Position)> + '_ {
        Direction::ALL.into_iter().filter_map(move |direction| {
            self.neighbor(position, direction)
                .map(|next| (direction, next))
        })
    }

    /// Returns the neighbours of `position` that generation has not reached yet, north first and
    /// then clockwise.
    pub fn unvisited_neighbors(&self, position: Position) -> Vec<(Direction, Position)> {
        self.neighbors(position)
            .filter(|&(_, next)| !self.is_visited(next))
            .collect()
    }

    /// Returns `true` iff the wall on the `direction` side of `position` is open.
    ///
    /// Positions outside the grid are never passable.
    pub fn is_passable(&self, position: Position, direction: Direction) -> bool {
        self.cell(position)
            .is_some_and(|cell| cell.walls.is_open(direction))
    }

    /// Iterates over the neighbours reachable from `position` through open walls.
    pub fn passages(&self, position: Position) -> impl Iterator<Item = Position> + '_ {
        self.neighbors(position)
            .filter(move |&(direction, _)| self.is_passable(position, direction))
            .map(|(_, next)| next)
    }

    /// Counts the open wall pairs of the whole grid.
    ///
    /// Each carved edge is counted once, through the east and south sides of its cells.
    pub fn passage_count(&self) -> usize {
        self.positions()
            .map(|position| {
                [Direction::East, Direction::South]
                    .into_iter()
                    .filter(|&direction| {
                        self.neighbor(position, direction).is_some()
                            && self.is_passable(position, direction)
                    })
                    .count()
            })
            .sum()
    }

    /// Opens the wall pair between `position` and its neighbour in `direction`.
    ///
    /// Returns the neighbour that was connected, or [`None`] when there is no such neighbour, in
    /// which case nothing is modified.
    pub(crate) fn carve(&mut self, position: Position, direction: Direction) -> Option<Position> {
        let next = self.neighbor(position, direction)?;
        let here = self.index(position)?;
        let there = self.index(next)?;

        self.cells.get_mut(here)?.walls.open(direction);
        self.cells.get_mut(there)?.walls.open(direction.opposite());

        Some(next)
    }

    /// Returns `true` if generation has marked `position` as reached.
    pub(crate) fn is_visited(&self, position: Position) -> bool {
        self.cell(position).is_some_and(|cell| cell.visited)
    }

    /// Marks `position` as reached by generation.
    pub(crate) fn mark_visited(&mut self, position: Position) {
        if let Some(cell) = self
            .index(position)
            .and_then(|idx| self.cells.get_mut(idx))
        {
            cell.visited = true;
        }
    }

    /// Row-major index of `position`.
    fn index(&self, position: Position) -> Option<usize> {
        self.contains(position)
            .then(|| usize::from(position.y) * usize::from(self.width) + usize::from(position.x))
    }
}
