//! Flood-fill path planning.
//!
//! Costs are edge crossings to the nearest goal cell using only walls known
//! so far. Edges never observed count as open.

use heapless::{Deque, Vec};

use crate::config::MAX_MAZE_LENGTH;
use crate::direction::Direction;
use crate::maze::{Coord, MazeGrid, UNREACHABLE};

const WORKLIST_CAPACITY: usize = 256;

const _: () = assert!(MAX_MAZE_LENGTH * MAX_MAZE_LENGTH <= WORKLIST_CAPACITY);

/// Whether `at` is in the goal region of an `N`-sided maze.
///
/// Odd sides have a single center cell; even sides the 2x2 center block.
#[must_use]
pub const fn is_goal<const N: usize>(at: Coord) -> bool {
    let hi = N / 2;
    let lo = if N % 2 == 0 { hi - 1 } else { hi };
    at.x >= lo && at.x <= hi && at.y >= lo && at.y <= hi
}

/// The goal region of an `N`-sided maze.
#[must_use]
pub fn goal_cells<const N: usize>() -> Vec<Coord, 4> {
    let mut goals = Vec::new();
    for at in MazeGrid::<N>::coords().filter(|&at| is_goal::<N>(at)) {
        let pushed = goals.push(at);
        debug_assert!(pushed.is_ok(), "more than four goal cells");
    }
    goals
}

/// Rebuilds the cost field of `grid` from scratch.
///
/// Goal cells are seeded with zero and relaxed breadth-first through every
/// edge not known to be walled. Cells no goal can reach keep
/// [`UNREACHABLE`].
pub fn recompute_costs<const N: usize>(grid: &mut MazeGrid<N>) {
    const { assert!(N > 0 && N <= MAX_MAZE_LENGTH) };

    grid.reset_costs();

    let mut worklist: Deque<Coord, WORKLIST_CAPACITY> = Deque::new();
    for goal in goal_cells::<N>() {
        grid.set_cost(goal, 0);
        let queued = worklist.push_back(goal);
        debug_assert!(queued.is_ok());
    }

    while let Some(at) = worklist.pop_front() {
        let next_cost = grid.cost(at).saturating_add(1);
        for dir in Direction::SCAN_ORDER {
            if grid.has_wall(at, dir) {
                continue;
            }
            let Some(next) = MazeGrid::<N>::neighbour(at, dir) else {
                continue;
            };
            if next_cost < grid.cost(next) {
                grid.set_cost(next, next_cost);
                // Breadth-first order settles a cell on its first
                // improvement, so each cell is queued at most once.
                let queued = worklist.push_back(next);
                debug_assert!(queued.is_ok(), "flood-fill worklist overflow");
            }
        }
    }

    trace!("costs recomputed, start cost {}", grid.cost(Coord::ORIGIN));
}
