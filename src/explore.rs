//! Depth-first maze exploration guided by the flood-fill cost field.
//!
//! Each step senses the current cell if it is new, then advances into the
//! cheapest unvisited open neighbour. With none left, the last forward step
//! is undone by driving back through it.

use crate::direction::{Direction, RelativeDirection, Turn};
use crate::error::Result;
use crate::maze::{Coord, MazeCell, MazeGrid, UNREACHABLE};
use crate::motion::ForwardOutcome;
use crate::mouse::Maneuver;
use crate::planner::{is_goal, recompute_costs};
use crate::stack::PathStack;
use crate::walls::{WallPresence, WallSide};

/// Cell and heading of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Pose {
    pub at: Coord,
    pub heading: Direction,
}

impl Pose {
    /// Start cell, facing north.
    pub const START: Pose = Pose {
        at: Coord::ORIGIN,
        heading: Direction::North,
    };
}

impl Default for Pose {
    fn default() -> Self {
        Self::START
    }
}

/// Result of one exploration step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Step {
    /// The robot stands in the goal region.
    AtGoal,
    /// Moved one cell forward in the search.
    Advanced(Direction),
    /// Backed out of a dead end by one cell.
    Retreated(Direction),
}

/// Exploration state for an `N`-sided maze.
#[derive(Debug, Clone)]
pub struct Explorer<const N: usize> {
    grid: MazeGrid<N>,
    pose: Pose,
    path: PathStack,
}

impl<const N: usize> Explorer<N> {
    /// Fresh map with the robot at the start pose.
    #[must_use]
    pub fn new() -> Self {
        let mut grid = MazeGrid::new();
        recompute_costs(&mut grid);
        Self {
            grid,
            pose: Pose::START,
            path: PathStack::new(),
        }
    }

    #[must_use]
    pub fn grid(&self) -> &MazeGrid<N> {
        &self.grid
    }

    #[must_use]
    pub fn pose(&self) -> Pose {
        self.pose
    }

    #[must_use]
    pub fn path(&self) -> &PathStack {
        &self.path
    }

    /// Performs one decision and the move it implies.
    ///
    /// Fails if the path stack overflows, or underflows because every
    /// reachable cell was visited without finding the goal.
    pub fn step(&mut self, robot: &mut impl Maneuver) -> Result<Step> {
        if is_goal::<N>(self.pose.at) {
            info!("goal reached at {}", self.pose.at);
            return Ok(Step::AtGoal);
        }

        if !self.grid.is_visited(self.pose.at) {
            let observed = self.sense_cell(robot);
            self.grid.record_cell(self.pose.at, observed);
            recompute_costs(&mut self.grid);
        }

        if let Some(dir) = self.next_direction() {
            self.path.push(dir)?;
            self.drive_toward(robot, dir);
            debug!("advance {} to {}, depth {}", dir, self.pose.at, self.path.depth());
            Ok(Step::Advanced(dir))
        } else {
            let back = self.path.pop()?.opposite();
            self.drive_toward(robot, back);
            debug!("retreat {} to {}, depth {}", back, self.pose.at, self.path.depth());
            Ok(Step::Retreated(back))
        }
    }

    /// Steps until the goal is reached, returning the moves made.
    pub fn run(&mut self, robot: &mut impl Maneuver) -> Result<u32> {
        let mut moves = 0;
        while self.step(robot)? != Step::AtGoal {
            moves += 1;
        }
        Ok(moves)
    }

    /// Cheapest open, unvisited neighbour. Ties go to the first direction in
    /// scan order.
    fn next_direction(&self) -> Option<Direction> {
        let mut best: Option<(Direction, u16)> = None;
        for dir in Direction::SCAN_ORDER {
            if self.grid.has_wall(self.pose.at, dir) {
                continue;
            }
            let Some(next) = MazeGrid::<N>::neighbour(self.pose.at, dir) else {
                continue;
            };
            if self.grid.is_visited(next) {
                continue;
            }
            let cost = self.grid.cost(next);
            if cost == UNREACHABLE {
                continue;
            }
            if best.is_none_or(|(_, lowest)| cost < lowest) {
                best = Some((dir, cost));
            }
        }
        best.map(|(dir, _)| dir)
    }

    /// Walls around the current cell in the absolute frame. The wall behind
    /// is only assumed at the start cell; anywhere else the robot just came
    /// through it.
    fn sense_cell(&self, robot: &mut impl Maneuver) -> MazeCell {
        let heading = self.pose.heading;
        let mut cell = MazeCell::OPEN;
        for (side, relative) in [
            (WallSide::Front, RelativeDirection::Front),
            (WallSide::Left, RelativeDirection::Left),
            (WallSide::Right, RelativeDirection::Right),
        ] {
            let walled = match robot.check_wall(side) {
                WallPresence::Found => true,
                WallPresence::NotFound => false,
                WallPresence::CannotRead => true,
            };
            cell.set_wall(heading.rotate(relative), walled);
        }
        cell.set_wall(
            heading.rotate(RelativeDirection::Back),
            self.pose.at == Coord::ORIGIN,
        );
        cell
    }

    /// Faces `dir`, then drives one cell.
    fn drive_toward(&mut self, robot: &mut impl Maneuver, dir: Direction) {
        match dir.relative_to(self.pose.heading) {
            RelativeDirection::Front => {}
            RelativeDirection::Right => robot.turn(Turn::Right),
            RelativeDirection::Left => robot.turn(Turn::Left),
            RelativeDirection::Back => {
                robot.turn(Turn::Right);
                robot.turn(Turn::Right);
            }
        }
        self.pose.heading = dir;

        if let ForwardOutcome::StoppedShort { travelled } = robot.forward_one_cell() {
            // The emergency stop only fires near the far wall of the cell
            // being entered, so the robot is still counted as arrived.
            warn!("move {} stopped short after {} ticks", dir, travelled);
        }
        if let Some(next) = MazeGrid::<N>::neighbour(self.pose.at, dir) {
            self.pose.at = next;
        }
    }
}

impl<const N: usize> Default for Explorer<N> {
    fn default() -> Self {
        Self::new()
    }
}
