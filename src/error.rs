//! Error types for the mouse control core.

use core::fmt;

use thiserror::Error;

use crate::fault::FaultKind;

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;

/// Hardware wait polled by a bounded watchdog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Peripheral {
    /// Front-wall alignment loop.
    FrontAlignment,
}

impl fmt::Display for Peripheral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FrontAlignment => "front-wall alignment",
        };
        f.write_str(name)
    }
}

/// Errors raised by the control core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A forward step was pushed onto a full path stack.
    #[error("pushing onto a full path stack (capacity {capacity})")]
    StackOverflow {
        /// Capacity of the stack that overflowed.
        capacity: usize,
    },

    /// A backtrack was requested with no forward steps left to undo.
    #[error("popping an empty path stack")]
    StackUnderflow,

    /// A bounded hardware wait ran out of polls.
    #[error("{peripheral} not ready after {polls} polls")]
    Timeout {
        /// Peripheral that never became ready.
        peripheral: Peripheral,
        /// Number of polls spent before giving up.
        polls: u32,
    },
}

impl Error {
    /// Creates a timeout error.
    #[must_use]
    pub const fn timeout(peripheral: Peripheral, polls: u32) -> Self {
        Self::Timeout { peripheral, polls }
    }

    /// LED fault pattern used to report this error.
    #[must_use]
    pub const fn fault_kind(&self) -> FaultKind {
        match self {
            Self::StackOverflow { .. } | Self::StackUnderflow => FaultKind::Generic,
            Self::Timeout { peripheral, .. } => match peripheral {
                Peripheral::FrontAlignment => FaultKind::IrSensor,
            },
        }
    }
}
