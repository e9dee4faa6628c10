//! Maze generation algorithms.
//!
//! Every algorithm here turns a freshly created [`Grid`] (all walls closed) into a perfect maze:
//! the open walls form a spanning tree over all cells. Randomness is always taken from the caller
//! so that a seeded source reproduces the same maze.

use std::fmt;

use clap::ValueEnum;
use rand::{
    seq::{IteratorRandom as _, SliceRandom as _},
    Rng,
};
use tracing::debug;

use crate::grid::{Direction, Grid, Position};

/// Available maze generation algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Algorithm {
    /// Randomized iterative depth-first carve with an explicit stack.
    #[default]
    Backtracker,
    /// Randomized Prim's algorithm over a frontier of candidate edges.
    Prim,
    /// Growing tree, picking a random active cell on every step.
    GrowingTree,
    /// Randomized Kruskal's algorithm over shuffled walls.
    Kruskal,
    /// Row-by-row runs closed by a northward passage.
    Sidewinder,
    /// Each cell opens towards a random choice of north or west.
    BinaryTree,
}

impl fmt::Display for Algorithm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.repr())
    }
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Self; 6] = [
        Self::Backtracker,
        Self::Prim,
        Self::GrowingTree,
        Self::Kruskal,
        Self::Sidewinder,
        Self::BinaryTree,
    ];

    /// Returns the human readable name of the algorithm.
    pub const fn repr(self) -> &'static str {
        match self {
            Self::Backtracker => "Recursive Backtracker",
            Self::Prim => "Prim",
            Self::GrowingTree => "Growing Tree",
            Self::Kruskal => "Kruskal",
            Self::Sidewinder => "Sidewinder",
            Self::BinaryTree => "Binary Tree",
        }
    }

    /// Carves a perfect maze into `grid` using this algorithm.
    ///
    /// The grid is expected to come straight from [`Grid::new`]; carving into an already carved
    /// grid may introduce cycles.
    pub fn generate<R: Rng + ?Sized>(self, grid: &mut Grid, rng: &mut R) {
        match self {
            Self::Backtracker => recursive_backtracker(grid, rng),
            Self::Prim => prim(grid, rng),
            Self::GrowingTree => growing_tree(grid, rng),
            Self::Kruskal => kruskal(grid, rng),
            Self::Sidewinder => sidewinder(grid, rng),
            Self::BinaryTree => binary_tree(grid, rng),
        }

        debug!(
            algorithm = %self,
            width = grid.width(),
            height = grid.height(),
            passages = grid.passage_count(),
            "maze generated"
        );
    }
}

/// Carves the maze with the randomized depth-first backtracker.
///
/// Generation starts at the top-left cell and walks to uniformly chosen unvisited neighbours,
/// pushing the cell it leaves onto an explicit stack. Dead ends pop the stack until a cell with an
/// unvisited neighbour comes back up; an empty stack at a dead end means every cell was reached.
pub fn recursive_backtracker<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut stack = Vec::with_capacity(grid.len());
    let mut current = Position::new(0, 0);
    grid.mark_visited(current);

    loop {
        let neighbors = grid.unvisited_neighbors(current);

        if let Some(&(direction, next)) = neighbors.choose(rng) {
            if grid.carve(current, direction).is_some() {
                stack.push(current);
                current = next;
                grid.mark_visited(current);
            }
        } else if let Some(previous) = stack.pop() {
            current = previous;
        } else {
            break;
        }
    }
}

/// Picks a uniformly random cell of the grid.
fn random_position<R: Rng + ?Sized>(grid: &Grid, rng: &mut R) -> Position {
    Position::new(rng.gen_range(0..grid.width()), rng.gen_range(0..grid.height()))
}

/// Randomized Prim's algorithm.
fn prim<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let start = random_position(grid, rng);
    grid.mark_visited(start);

    let mut frontier: Vec<(Position, Direction)> = grid
        .neighbors(start)
        .map(|(direction, _)| (start, direction))
        .collect();

    while !frontier.is_empty() {
        let (from, direction) = frontier.swap_remove(rng.gen_range(0..frontier.len()));
        let Some(to) = grid.neighbor(from, direction) else {
            continue;
        };
        if grid.is_visited(to) {
            continue;
        }

        let _ = grid.carve(from, direction);
        grid.mark_visited(to);
        frontier.extend(
            grid.unvisited_neighbors(to)
                .into_iter()
                .map(|(outward, _)| (to, outward)),
        );
    }
}

/// Growing tree with a uniformly random selection from the active list.
fn growing_tree<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let start = random_position(grid, rng);
    grid.mark_visited(start);
    let mut active = vec![start];

    while !active.is_empty() {
        let idx = rng.gen_range(0..active.len());
        let Some(&cell) = active.get(idx) else {
            break;
        };

        match grid.unvisited_neighbors(cell).choose(rng) {
            Some(&(direction, next)) => {
                let _ = grid.carve(cell, direction);
                grid.mark_visited(next);
                active.push(next);
            }
            None => {
                let _ = active.swap_remove(idx);
            }
        }
    }
}

/// Union-find over row-major cell indices.
struct DisjointSet {
    /// Parent link of each element; roots point at themselves.
    parent: Vec<usize>,
}

impl DisjointSet {
    /// Creates `len` singleton sets.
    fn new(len: usize) -> Self {
        Self {
            parent: (0..len).collect(),
        }
    }

    /// Returns the root of the set holding `element`, compressing the path behind it.
    fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while let Some(&parent) = self.parent.get(root) {
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut node = element;
        while node != root {
            let Some(slot) = self.parent.get_mut(node) else {
                break;
            };
            node = std::mem::replace(slot, root);
        }

        root
    }

    /// Merges the sets of `first` and `second`, returning `false` if they were already joined.
    fn union(&mut self, first: usize, second: usize) -> bool {
        let first_root = self.find(first);
        let second_root = self.find(second);
        if first_root == second_root {
            return false;
        }

        if let Some(slot) = self.parent.get_mut(second_root) {
            *slot = first_root;
        }
        true
    }
}

/// Randomized Kruskal's algorithm.
fn kruskal<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let width = usize::from(grid.width());
    let index = |position: Position| usize::from(position.y) * width + usize::from(position.x);

    let mut walls: Vec<(Position, Direction, Position)> = grid
        .positions()
        .flat_map(|position| {
            [Direction::North, Direction::West]
                .into_iter()
                .filter_map(move |direction| {
                    position
                        .step(direction)
                        .map(|next| (position, direction, next))
                })
        })
        .collect();
    walls.shuffle(rng);

    let mut sets = DisjointSet::new(grid.len());
    for (position, direction, next) in walls {
        if sets.union(index(position), index(next)) {
            let _ = grid.carve(position, direction);
        }
    }
}

/// Sidewinder, closing each eastward run with a northward passage.
fn sidewinder<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let last_column = grid.width() - 1;

    for x in 0..last_column {
        let _ = grid.carve(Position::new(x, 0), Direction::East);
    }

    for y in 1..grid.height() {
        let mut run_start = 0;
        for x in 0..=last_column {
            if x == last_column || rng.gen_bool(0.5) {
                let passage = Position::new(rng.gen_range(run_start..=x), y);
                let _ = grid.carve(passage, Direction::North);
                run_start = x + 1;
            } else {
                let _ = grid.carve(Position::new(x, y), Direction::East);
            }
        }
    }
}

/// Binary tree biased towards the north and west edges.
fn binary_tree<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let positions: Vec<Position> = grid.positions().collect();

    for position in positions {
        let choice = [Direction::North, Direction::West]
            .into_iter()
            .filter(|&direction| grid.neighbor(position, direction).is_some())
            .choose(rng);

        if let Some(direction) = choice {
            let _ = grid.carve(position, direction);
        }
    }
}
