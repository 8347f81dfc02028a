//! Fault kinds and their LED blink patterns.
//!
//! The error LED is lit solid while faulted. The three status LEDs
//! (D1, D2, D3) blink a kind-specific subset at [`BLINK_HALF_PERIOD_MS`].

/// Time each blink phase is held, in milliseconds.
pub const BLINK_HALF_PERIOD_MS: u32 = 500;

/// Fatal fault classes, each with its own blink pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// Unclassified failure, including path stack misuse.
    Generic,
    /// Edge counting or time-base failure.
    Timer,
    /// IR sensing failure.
    IrSensor,
}

impl FaultKind {
    /// Status LEDs `[D1, D2, D3]` that blink for this fault.
    #[must_use]
    pub const fn blink_pattern(self) -> [bool; 3] {
        match self {
            Self::Generic => [true, false, false],
            Self::Timer => [false, true, false],
            Self::IrSensor => [true, false, true],
        }
    }
}
