//! Hand-on-wall maze following. No map, no memory between steps.

use crate::direction::Turn;
use crate::mouse::Maneuver;
use crate::walls::{WallPresence, WallSide};

/// Which hand stays on the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hand {
    Left,
    Right,
}

impl Hand {
    const fn side(self) -> WallSide {
        match self {
            Hand::Left => WallSide::Left,
            Hand::Right => WallSide::Right,
        }
    }

    const fn toward(self) -> Turn {
        match self {
            Hand::Left => Turn::Left,
            Hand::Right => Turn::Right,
        }
    }

    const fn away(self) -> Turn {
        match self {
            Hand::Left => Turn::Right,
            Hand::Right => Turn::Left,
        }
    }
}

/// Turns allowed while blocked in front before giving up on the cell. Four
/// turns face the robot back the way it started.
const MAX_BLOCKED_TURNS: u32 = 4;

/// Wall follower for one hand.
#[derive(Debug, Clone, Copy)]
pub struct WallFollower {
    hand: Hand,
}

impl WallFollower {
    #[must_use]
    pub const fn new(hand: Hand) -> Self {
        Self { hand }
    }

    #[must_use]
    pub const fn hand(&self) -> Hand {
        self.hand
    }

    /// Moves one cell, then turns toward the followed wall if it opened up,
    /// or away from every wall blocking the way ahead.
    pub fn step(&self, robot: &mut impl Maneuver) {
        robot.forward_one_cell();

        if robot.check_wall(self.hand.side()) == WallPresence::NotFound {
            robot.turn(self.hand.toward());
        }

        let mut turns = 0;
        while robot.check_wall(WallSide::Front) != WallPresence::NotFound {
            if turns == MAX_BLOCKED_TURNS {
                warn!("boxed in while following the {} wall", self.hand);
                break;
            }
            robot.adjust_to_front_wall();
            robot.turn(self.hand.away());
            turns += 1;
        }
    }
}
