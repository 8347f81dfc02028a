//! Closed-loop motion primitives.
//!
//! Every primitive clears both edge counters, runs a PD loop to a tick
//! target, then stops both motors and clears the counters again.

mod adjust;
mod forward;
pub mod pd;
mod turn;

pub use adjust::AdjustOutcome;
pub use forward::{ForwardOutcome, ForwardPlan, SideWalls};
pub use turn::{TurnAngle, TurnTargets};
