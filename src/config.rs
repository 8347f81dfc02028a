//! Calibration and build-time configuration.
//!
//! All values were tuned on the physical robot. Tick counts are encoder
//! rising edges per wheel; speeds are PWM duty cycles out of 255. IR
//! thresholds are 10-bit ADC readings.
//!
//! # Maze
//!
//! - **Side length**: [`MAZE_LENGTH`] cells (5x5 test maze)
//! - **Wall length**: 180 mm test maze walls
//!
//! # Robot
//!
//! - **Body**: 93 mm long, 61 mm wide
//! - **Wheels**: 103 mm circumference, 90 mm track
//! - **Encoders**: 28 counted edges per wheel revolution (measured with slip)

/// Cells along one side of the maze.
pub const MAZE_LENGTH: usize = 5;

/// Largest maze side the planner's worklist is sized for.
pub const MAX_MAZE_LENGTH: usize = 16;

/// Entries the exploration backtrack stack can hold.
pub const PATH_STACK_CAPACITY: usize = 1000;

/// Largest duty cycle magnitude accepted by the motor driver.
pub const MAX_DUTY: i32 = 255;

/// Proportional and derivative gains of one PD loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdGains {
    /// Proportional term.
    pub kp: f32,
    /// Derivative term.
    pub kd: f32,
}

impl PdGains {
    /// Creates a gain pair.
    #[must_use]
    pub const fn new(kp: f32, kd: f32) -> Self {
        Self { kp, kd }
    }
}

/// Gains and offsets used to steer off the side walls while driving forward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallSteering {
    /// Gains when both side walls are visible.
    pub both_walls: PdGains,
    /// Gains when only one side wall is visible.
    pub single_wall: PdGains,
}

/// Raw IR thresholds deciding wall presence.
///
/// A reading at or above the threshold means the wall is there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorThresholds {
    /// Average of the two front sensors.
    pub front: u16,
    /// Left diagonal sensor.
    pub left: u16,
    /// Right diagonal sensor.
    pub right: u16,
    /// Front average that aborts forward motion (about 30 mm to the wall).
    pub front_too_close: u16,
}

impl SensorThresholds {
    /// Thresholds for 180 mm test maze walls.
    pub const WALLS_180MM: Self = Self {
        front: 128,
        left: 101,
        right: 101,
        front_too_close: 160,
    };
}

impl Default for SensorThresholds {
    fn default() -> Self {
        Self::WALLS_180MM
    }
}

/// Motion primitive calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionConfig {
    /// Base duty while driving forward.
    pub forward_speed: u8,
    /// Base duty of each wheel while turning in place.
    pub turn_speed: u8,
    /// Duty used while squaring up against a front wall.
    pub adjust_speed: u8,

    /// Ticks per wheel to cross one square from rest.
    pub edges_per_square: u32,
    /// Ticks per wheel per square on a multi-square straight.
    pub edges_per_square_continuous: u32,
    /// Ticks per wheel for a 90 degree right turn.
    pub edges_per_90_right: u32,
    /// Ticks per wheel for a 90 degree left turn.
    pub edges_per_90_left: u32,

    /// Heading loop on the encoder difference.
    pub heading_gains: PdGains,
    /// Wall steering for single squares.
    pub square_steering: WallSteering,
    /// Wall steering for multi-square straights.
    pub straight_steering: WallSteering,
    /// Per-wheel turn loop.
    pub turn_gains: PdGains,

    /// Added to a side threshold to get the single-wall set point.
    pub single_wall_offset: i32,
    /// Multiplier applied to a positive single-wall error (wall too far).
    pub single_wall_far_gain: i32,
    /// Scale of the left single-wall error; the sign steers right.
    pub left_wall_scale: i32,
    /// Scale of the right single-wall error.
    pub right_wall_scale: i32,

    /// Front sensor difference accepted as square to the wall.
    pub adjust_tolerance: u16,
    /// Sensor polls allowed while squaring up.
    pub adjust_max_polls: u32,

    /// Pause after each forward square, in milliseconds.
    pub settle_after_forward_ms: u32,
    /// Pause after each turn, in milliseconds.
    pub settle_after_turn_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            forward_speed: 140,
            turn_speed: 90,
            adjust_speed: 100,

            edges_per_square: 77,
            edges_per_square_continuous: 89,
            edges_per_90_right: 33,
            edges_per_90_left: 33,

            heading_gains: PdGains::new(2.0, 0.2),
            square_steering: WallSteering {
                both_walls: PdGains::new(0.1, 0.01),
                single_wall: PdGains::new(0.1, 0.01),
            },
            straight_steering: WallSteering {
                both_walls: PdGains::new(0.05, 0.01),
                single_wall: PdGains::new(0.5, 5.0),
            },
            turn_gains: PdGains::new(1.0, 0.5),

            single_wall_offset: 60,
            single_wall_far_gain: 5,
            left_wall_scale: 2,
            right_wall_scale: 3,

            adjust_tolerance: 10,
            adjust_max_polls: 20_000,

            settle_after_forward_ms: 80,
            settle_after_turn_ms: 100,
        }
    }
}

/// Complete robot configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MouseConfig {
    /// Motion primitive calibration.
    pub motion: MotionConfig,
    /// Wall detection thresholds.
    pub thresholds: SensorThresholds,
}
