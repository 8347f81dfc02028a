//! Control core of a maze-solving micromouse.
//!
//! The robot explores an unknown square maze, records the walls it sees and
//! heads for the center using a flood-fill cost field. Motion is closed-loop:
//! PD controllers on wheel encoder ticks, corrected by diagonal IR readings
//! of the side walls.
//!
//! Hardware is reached only through the traits in [`hal`], so everything
//! here runs unchanged on the target and in host tests.
//!
//! # Layout
//!
//! - [`maze`], [`planner`]: wall map and cost field
//! - [`explore`], [`follower`]: exploration strategies
//! - [`walls`]: tri-state wall perception with update gates
//! - [`motion`], [`mouse`]: PD motion primitives over the hardware
//! - [`odometry`], [`switch`]: interrupt-shared counters and the config button
#![cfg_attr(not(test), no_std)]

mod fmt;

pub mod config;
pub mod direction;
pub mod error;
pub mod explore;
pub mod fault;
pub mod follower;
pub mod hal;
pub mod maze;
pub mod motion;
pub mod mouse;
pub mod odometry;
pub mod planner;
pub mod stack;
pub mod switch;
pub mod time;
pub mod walls;
pub mod watchdog;

pub use config::{MAZE_LENGTH, MouseConfig};
pub use direction::{Direction, RelativeDirection, Turn};
pub use error::{Error, Result};
pub use explore::{Explorer, Pose, Step};
pub use fault::FaultKind;
pub use follower::{Hand, WallFollower};
pub use maze::{Coord, MazeCell, MazeGrid};
pub use mouse::{Maneuver, Mouse};
pub use switch::{ConfigSwitch, RunMode};
pub use walls::{WallDetector, WallPresence, WallSide};
