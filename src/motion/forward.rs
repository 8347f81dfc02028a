//! Straight-line motion over whole maze squares.
//!
//! One PD loop holds the heading on the encoder difference. While side walls
//! are visible, a second PD loop on the diagonal IR readings feeds its output
//! into the heading error, pulling the robot toward the corridor center.

use crate::config::{MotionConfig, PdGains, SensorThresholds, WallSteering};
use crate::hal::{Clock, IrSensor, IrSensors, Motors, Odometry, Wheel};
use crate::mouse::Mouse;
use crate::walls::{UpdateGate, WallPresence, WallSide};

use super::pd::{Pd, drive, stop_both};

/// How a forward move ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ForwardOutcome {
    /// The tick target was reached.
    Completed,
    /// The front wall came too close first.
    StoppedShort {
        /// Summed ticks of both wheels when the move stopped.
        travelled: u32,
    },
}

/// Tick targets and gains for one forward move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForwardPlan {
    /// Ticks per wheel per square.
    pub edges_per_square: u32,
    /// Summed ticks of both wheels at which the move is complete.
    pub target: u32,
    pub steering: WallSteering,
}

impl ForwardPlan {
    /// Single squares use the from-rest calibration; longer straights use
    /// the continuous one.
    #[must_use]
    pub fn new(config: &MotionConfig, squares: u32) -> Self {
        let (edges_per_square, steering) = if squares == 1 {
            (config.edges_per_square, config.square_steering)
        } else {
            (config.edges_per_square_continuous, config.straight_steering)
        };
        Self {
            edges_per_square,
            target: edges_per_square * squares * 2,
            steering,
        }
    }

    /// Side walls may only be refreshed through the first half of each
    /// square; past that the diagonal sensors see the next cell.
    #[must_use]
    pub fn side_gate(&self, travelled: u32) -> UpdateGate {
        let square = self.edges_per_square * 2;
        if square == 0 || travelled % square <= square / 2 {
            UpdateGate::Available
        } else {
            UpdateGate::NotAvailable
        }
    }
}

/// Visible side walls and their raw readings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideWalls {
    Both { left: u16, right: u16 },
    Left(u16),
    Right(u16),
    Neither,
}

impl SideWalls {
    /// Steering error, positive to turn right. `None` without walls.
    #[must_use]
    pub fn error(self, config: &MotionConfig, thresholds: &SensorThresholds) -> Option<i32> {
        let far = |error: i32| {
            if error > 0 {
                error * config.single_wall_far_gain
            } else {
                error
            }
        };

        match self {
            SideWalls::Both { left, right } => {
                let left_error = i32::from(thresholds.left) - i32::from(left);
                let right_error = i32::from(thresholds.right) - i32::from(right);
                Some(right_error - left_error)
            }
            SideWalls::Left(reading) => {
                let set_point = i32::from(thresholds.left) + config.single_wall_offset;
                Some(-far(set_point - i32::from(reading)) * config.left_wall_scale)
            }
            SideWalls::Right(reading) => {
                let set_point = i32::from(thresholds.right) + config.single_wall_offset;
                Some(far(set_point - i32::from(reading)) * config.right_wall_scale)
            }
            SideWalls::Neither => None,
        }
    }

    /// Gains for this wall configuration.
    #[must_use]
    pub fn gains(self, steering: &WallSteering) -> PdGains {
        match self {
            SideWalls::Both { .. } | SideWalls::Neither => steering.both_walls,
            SideWalls::Left(_) | SideWalls::Right(_) => steering.single_wall,
        }
    }
}

impl<M, S, O, C> Mouse<M, S, O, C>
where
    M: Motors,
    S: IrSensors,
    O: Odometry,
    C: Clock,
{
    /// Drives `squares` maze squares straight ahead.
    ///
    /// Stops early only if the front wall comes too close. Side wall flags
    /// are refreshed during the first half of every square.
    pub fn move_forward_squares(&mut self, squares: u32) -> ForwardOutcome {
        if squares == 0 {
            return ForwardOutcome::Completed;
        }

        let plan = ForwardPlan::new(&self.config, squares);
        let base = i32::from(self.config.forward_speed);
        let mut heading = Pd::new();
        let mut steering = Pd::new();

        self.clear_edge_counts();
        for wheel in Wheel::BOTH {
            self.motors.set_speed(wheel, self.config.forward_speed);
            self.motors.start_forward(wheel);
        }

        let outcome = loop {
            let (left, right) = self.edge_counts();
            let travelled = left + right;
            if travelled >= plan.target {
                break ForwardOutcome::Completed;
            }
            if self.walls.front_too_close(&mut self.sensors) {
                break ForwardOutcome::StoppedShort { travelled };
            }

            self.walls.set_side_gates(plan.side_gate(travelled));
            self.walls.update(WallSide::Left, &mut self.sensors);
            self.walls.update(WallSide::Right, &mut self.sensors);

            let side = self.side_walls();
            let correction = match side.error(&self.config, self.walls.thresholds()) {
                Some(error) => steering.update(side.gains(&plan.steering), error as f32) as i32,
                None => {
                    steering.reset();
                    0
                }
            };

            let (left, right) = self.edge_counts();
            let angle_error = -(left as i32 - right as i32) + correction;
            let output = heading.update(self.config.heading_gains, angle_error as f32) as i32;

            drive(&mut self.motors, Wheel::Left, base + output);
            drive(&mut self.motors, Wheel::Right, base - output);
        };

        stop_both(&mut self.motors);
        self.clear_edge_counts();

        match outcome {
            ForwardOutcome::Completed => trace!("forward {} squares done", squares),
            ForwardOutcome::StoppedShort { travelled } => {
                warn!("front wall too close, stopped after {} of {} ticks", travelled, plan.target)
            }
        }
        outcome
    }

    fn side_walls(&mut self) -> SideWalls {
        let left = self.walls.sense(WallSide::Left, &mut self.sensors) == WallPresence::Found;
        let right = self.walls.sense(WallSide::Right, &mut self.sensors) == WallPresence::Found;
        match (left, right) {
            (true, true) => SideWalls::Both {
                left: self.sensors.read(IrSensor::LeftDiagonal),
                right: self.sensors.read(IrSensor::RightDiagonal),
            },
            (true, false) => SideWalls::Left(self.sensors.read(IrSensor::LeftDiagonal)),
            (false, true) => SideWalls::Right(self.sensors.read(IrSensor::RightDiagonal)),
            (false, false) => SideWalls::Neither,
        }
    }

    pub(crate) fn edge_counts(&self) -> (u32, u32) {
        (
            self.odometry.edge_count(Wheel::Left),
            self.odometry.edge_count(Wheel::Right),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const T: SensorThresholds = SensorThresholds::WALLS_180MM;

    #[test]
    fn test_plan_targets() {
        let config = MotionConfig::default();
        let single = ForwardPlan::new(&config, 1);
        assert_eq!(single.target, 154);
        assert_eq!(single.steering, config.square_steering);

        let straight = ForwardPlan::new(&config, 3);
        assert_eq!(straight.target, 89 * 3 * 2);
        assert_eq!(straight.steering, config.straight_steering);
    }

    #[test]
    fn test_side_gate_per_square() {
        let plan = ForwardPlan::new(&MotionConfig::default(), 2);
        // 178 summed ticks per square
        assert_eq!(plan.side_gate(0), UpdateGate::Available);
        assert_eq!(plan.side_gate(89), UpdateGate::Available);
        assert_eq!(plan.side_gate(90), UpdateGate::NotAvailable);
        assert_eq!(plan.side_gate(178), UpdateGate::Available);
        assert_eq!(plan.side_gate(300), UpdateGate::NotAvailable);
    }

    #[test]
    fn test_centered_between_walls() {
        let config = MotionConfig::default();
        let error = SideWalls::Both { left: 101, right: 101 }.error(&config, &T);
        assert_eq!(error, Some(0));

        // Closer to the right wall: steer left.
        let error = SideWalls::Both { left: 90, right: 130 }.error(&config, &T);
        assert_eq!(error, Some((101 - 130) - (101 - 90)));
        assert!(error.is_some_and(|e| e < 0));
    }

    #[test]
    fn test_single_wall_errors() {
        let config = MotionConfig::default();
        // Left wall too far: (161 - 141) * 5 = 100, scaled by -2
        assert_eq!(SideWalls::Left(141).error(&config, &T), Some(-200));
        // Left wall too close: 161 - 181 = -20, scaled by -2
        assert_eq!(SideWalls::Left(181).error(&config, &T), Some(40));
        // Right wall too far: (161 - 151) * 5 * 3
        assert_eq!(SideWalls::Right(151).error(&config, &T), Some(150));
        assert_eq!(SideWalls::Right(171).error(&config, &T), Some(-30));
        assert_eq!(SideWalls::Neither.error(&config, &T), None);
    }
}
