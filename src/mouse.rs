//! The robot: hardware handles, wall perception and calibration in one
//! owned aggregate.

use crate::config::{MotionConfig, MouseConfig};
use crate::direction::Turn;
use crate::hal::{Clock, IrSensors, Motors, Odometry, Wheel};
use crate::motion::{AdjustOutcome, ForwardOutcome, TurnAngle};
use crate::walls::{WallDetector, WallPresence, WallSide};

/// Pause before the demo run starts.
pub const DEMO_START_DELAY_MS: u32 = 2000;

/// Squares driven by the demo run.
pub const DEMO_SQUARES: u32 = 4;

/// Cell-level moves the exploration strategies are written against.
pub trait Maneuver {
    /// Drives one square forward and settles.
    fn forward_one_cell(&mut self) -> ForwardOutcome;

    /// Turns 90 degrees in place and settles.
    fn turn(&mut self, turn: Turn);

    /// Squares up against the wall in front.
    fn adjust_to_front_wall(&mut self) -> AdjustOutcome;

    /// Refreshes and returns the wall state of `side`.
    fn check_wall(&mut self, side: WallSide) -> WallPresence;
}

/// Micromouse hardware plus the state the motion primitives share.
pub struct Mouse<M, S, O, C> {
    pub(crate) motors: M,
    pub(crate) sensors: S,
    pub(crate) odometry: O,
    pub(crate) clock: C,
    pub(crate) walls: WallDetector,
    pub(crate) config: MotionConfig,
}

impl<M, S, O, C> Mouse<M, S, O, C>
where
    M: Motors,
    S: IrSensors,
    O: Odometry,
    C: Clock,
{
    pub fn new(motors: M, sensors: S, odometry: O, clock: C, config: MouseConfig) -> Self {
        Self {
            motors,
            sensors,
            odometry,
            clock,
            walls: WallDetector::new(config.thresholds),
            config: config.motion,
        }
    }

    #[must_use]
    pub fn walls(&self) -> &WallDetector {
        &self.walls
    }

    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Logs the wall state and raw readings. Opens every wall gate.
    pub fn report_walls(&mut self) {
        self.walls.report(&mut self.sensors);
    }

    /// Waits [`DEMO_START_DELAY_MS`] so the robot can be let go, then drives
    /// [`DEMO_SQUARES`] squares straight.
    pub fn run_demo(&mut self) -> ForwardOutcome {
        self.clock.delay_ms(DEMO_START_DELAY_MS);
        self.move_forward_squares(DEMO_SQUARES)
    }

    pub(crate) fn clear_edge_counts(&self) {
        for wheel in Wheel::BOTH {
            self.odometry.clear_edge_count(wheel);
        }
    }
}

impl<M, S, O, C> Maneuver for Mouse<M, S, O, C>
where
    M: Motors,
    S: IrSensors,
    O: Odometry,
    C: Clock,
{
    fn forward_one_cell(&mut self) -> ForwardOutcome {
        let outcome = self.move_forward_squares(1);
        self.clock.delay_ms(self.config.settle_after_forward_ms);
        outcome
    }

    fn turn(&mut self, turn: Turn) {
        self.turn_in_place(turn, TurnAngle::Deg90);
        self.clock.delay_ms(self.config.settle_after_turn_ms);
    }

    fn adjust_to_front_wall(&mut self) -> AdjustOutcome {
        self.align_to_front_wall()
    }

    fn check_wall(&mut self, side: WallSide) -> WallPresence {
        self.walls.check(side, &mut self.sensors)
    }
}
