//! In-place rotation.
//!
//! Each wheel runs its own PD loop toward a tick target and stops on its
//! own; the turn is over once both have stopped.

use crate::config::{MAX_DUTY, MotionConfig};
use crate::direction::Turn;
use crate::hal::{Clock, IrSensors, Motors, Odometry, Wheel};
use crate::mouse::Mouse;

use super::pd::{Pd, stop_both};

/// Rotation size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TurnAngle {
    Deg45,
    Deg90,
}

/// Ticks each wheel must travel for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnTargets {
    pub left: u32,
    pub right: u32,
}

impl TurnTargets {
    /// 45 degree targets are the 90 degree ones halved.
    #[must_use]
    pub fn new(config: &MotionConfig, turn: Turn, angle: TurnAngle) -> Self {
        let quarter = match turn {
            Turn::Right => config.edges_per_90_right,
            Turn::Left => config.edges_per_90_left,
        };
        let edges = match angle {
            TurnAngle::Deg90 => quarter,
            TurnAngle::Deg45 => quarter / 2,
        };
        Self {
            left: edges,
            right: edges,
        }
    }

    const fn get(&self, wheel: Wheel) -> u32 {
        match wheel {
            Wheel::Left => self.left,
            Wheel::Right => self.right,
        }
    }
}

/// Whether `wheel` runs forward during `turn`.
const fn runs_forward(turn: Turn, wheel: Wheel) -> bool {
    matches!(
        (turn, wheel),
        (Turn::Right, Wheel::Left) | (Turn::Left, Wheel::Right)
    )
}

impl<M, S, O, C> Mouse<M, S, O, C>
where
    M: Motors,
    S: IrSensors,
    O: Odometry,
    C: Clock,
{
    /// Rotates in place. A 90 degree turn also rotates the wall flags.
    pub fn turn_in_place(&mut self, turn: Turn, angle: TurnAngle) {
        let targets = TurnTargets::new(&self.config, turn, angle);
        let base = i32::from(self.config.turn_speed);
        let gains = self.config.turn_gains;
        let mut loops = [Pd::new(), Pd::new()];
        let mut done = [false, false];

        self.clear_edge_counts();
        for wheel in Wheel::BOTH {
            self.motors.set_speed(wheel, self.config.turn_speed);
            self.start(wheel, runs_forward(turn, wheel));
        }

        while !done.iter().all(|&d| d) {
            for wheel in Wheel::BOTH {
                let i = wheel as usize;
                if done[i] {
                    continue;
                }

                let target = targets.get(wheel);
                let count = self.odometry.edge_count(wheel);
                if count >= target {
                    self.motors.stop(wheel);
                    done[i] = true;
                    continue;
                }

                let error = (target - count) as f32;
                let duty = (base + loops[i].update(gains, error) as i32).clamp(0, MAX_DUTY);
                self.motors.set_speed(wheel, duty as u8);
                self.start(wheel, runs_forward(turn, wheel));
            }
        }

        if angle == TurnAngle::Deg90 {
            self.walls.rotate(turn);
        }

        stop_both(&mut self.motors);
        self.clear_edge_counts();
        trace!("turned {} {}", turn, angle);
    }

    fn start(&mut self, wheel: Wheel, forward: bool) {
        if forward {
            self.motors.start_forward(wheel);
        } else {
            self.motors.start_backward(wheel);
        }
    }
}
