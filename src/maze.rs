//! Maze wall knowledge and cost field storage.

use crate::direction::Direction;

/// Cost of a cell no goal can reach (or not yet computed).
pub const UNREACHABLE: u16 = u16::MAX;

/// Cell coordinate. `(0, 0)` is the start corner; `y` grows to the north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    /// The start cell.
    pub const ORIGIN: Coord = Coord { x: 0, y: 0 };

    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Known walls around one cell, in the absolute frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MazeCell {
    walls: [bool; 4],
}

impl MazeCell {
    /// A cell with no walls.
    pub const OPEN: MazeCell = MazeCell { walls: [false; 4] };

    /// Whether the edge toward `dir` is walled.
    #[must_use]
    pub const fn has_wall(&self, dir: Direction) -> bool {
        self.walls[dir as usize]
    }

    /// Marks the edge toward `dir` as walled or open.
    pub fn set_wall(&mut self, dir: Direction, present: bool) {
        self.walls[dir as usize] = present;
    }

    /// Builder form of [`MazeCell::set_wall`] for a present wall.
    #[must_use]
    pub const fn with_wall(mut self, dir: Direction) -> Self {
        self.walls[dir as usize] = true;
        self
    }
}

/// Square maze of side `N`: walls, visited flags and the cost field.
///
/// Indexed `[y][x]`. Cells outside `[0, N)` on either axis do not exist;
/// neighbour lookups return `None` for them instead of wrapping.
#[derive(Debug, Clone)]
pub struct MazeGrid<const N: usize> {
    cells: [[MazeCell; N]; N],
    visited: [[bool; N]; N],
    costs: [[u16; N]; N],
}

impl<const N: usize> MazeGrid<N> {
    /// An unexplored maze: no walls known, nothing visited, no costs.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [[MazeCell::OPEN; N]; N],
            visited: [[false; N]; N],
            costs: [[UNREACHABLE; N]; N],
        }
    }

    /// Whether signed `(x, y)` lies inside the grid.
    #[must_use]
    pub const fn contains(x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < N && (y as usize) < N
    }

    /// The cell one step from `at` toward `dir`, if it exists.
    #[must_use]
    pub const fn neighbour(at: Coord, dir: Direction) -> Option<Coord> {
        let (dx, dy) = dir.delta();
        let x = at.x as i32 + dx;
        let y = at.y as i32 + dy;
        if Self::contains(x, y) {
            Some(Coord::new(x as usize, y as usize))
        } else {
            None
        }
    }

    /// Iterates over every coordinate, row by row from the south.
    pub fn coords() -> impl Iterator<Item = Coord> {
        (0..N).flat_map(|y| (0..N).map(move |x| Coord::new(x, y)))
    }

    #[must_use]
    pub fn cell(&self, at: Coord) -> MazeCell {
        self.cells[at.y][at.x]
    }

    /// Whether the edge of `at` toward `dir` is known to be walled.
    #[must_use]
    pub fn has_wall(&self, at: Coord, dir: Direction) -> bool {
        self.cells[at.y][at.x].has_wall(dir)
    }

    #[must_use]
    pub fn is_visited(&self, at: Coord) -> bool {
        self.visited[at.y][at.x]
    }

    /// Flood-fill cost of `at`, [`UNREACHABLE`] if none.
    #[must_use]
    pub fn cost(&self, at: Coord) -> u16 {
        self.costs[at.y][at.x]
    }

    pub(crate) fn set_cost(&mut self, at: Coord, cost: u16) {
        self.costs[at.y][at.x] = cost;
    }

    pub(crate) fn reset_costs(&mut self) {
        self.costs = [[UNREACHABLE; N]; N];
    }

    /// Stores the observed walls of `at` and marks it visited.
    ///
    /// Knowledge is never revised: recording a cell that was already visited
    /// does nothing and returns `false`. An edge shared with a visited
    /// neighbour keeps that neighbour's earlier observation. Walls on edges
    /// shared with unvisited neighbours are copied onto them.
    pub fn record_cell(&mut self, at: Coord, observed: MazeCell) -> bool {
        if self.is_visited(at) {
            return false;
        }

        let mut cell = observed;
        for dir in Direction::SCAN_ORDER {
            let Some(next) = Self::neighbour(at, dir) else {
                continue;
            };
            let back = dir.opposite();
            if self.is_visited(next) {
                cell.set_wall(dir, self.has_wall(next, back));
            } else if cell.has_wall(dir) {
                self.cells[next.y][next.x].set_wall(back, true);
            }
        }

        self.cells[at.y][at.x] = cell;
        self.visited[at.y][at.x] = true;
        true
    }
}

impl<const N: usize> Default for MazeGrid<N> {
    fn default() -> Self {
        Self::new()
    }
}
