//! Hardware contracts consumed by the control core.
//!
//! Board support implements these traits; the core never touches registers.
//! Host tests implement them over simulated hardware.

use crate::fault::FaultKind;

/// Drive wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Wheel {
    /// Left wheel (motor 1, encoder 1)
    Left,
    /// Right wheel (motor 2, encoder 2)
    Right,
}

impl Wheel {
    /// Both wheels, left first.
    pub const BOTH: [Wheel; 2] = [Wheel::Left, Wheel::Right];
}

/// Infrared proximity sensor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IrSensor {
    /// Forward-facing, left side (IR1)
    FrontLeft,
    /// Diagonal, looking at the left wall (IR2)
    LeftDiagonal,
    /// Diagonal, looking at the right wall (IR3)
    RightDiagonal,
    /// Forward-facing, right side (IR4)
    FrontRight,
}

impl IrSensor {
    /// All sensors in IR1..IR4 order.
    pub const ALL: [IrSensor; 4] = [
        IrSensor::FrontLeft,
        IrSensor::LeftDiagonal,
        IrSensor::RightDiagonal,
        IrSensor::FrontRight,
    ];
}

/// Wheel encoder edge counters.
///
/// Counts are maintained asynchronously (interrupt level) and only read or
/// cleared here. A count increases while the wheel turns in either direction.
pub trait Odometry {
    /// Edges seen on `wheel` since its last clear.
    fn edge_count(&self, wheel: Wheel) -> u32;

    /// Resets the edge count of `wheel` to zero.
    fn clear_edge_count(&self, wheel: Wheel);
}

impl<T: Odometry + ?Sized> Odometry for &T {
    fn edge_count(&self, wheel: Wheel) -> u32 {
        (**self).edge_count(wheel)
    }

    fn clear_edge_count(&self, wheel: Wheel) {
        (**self).clear_edge_count(wheel);
    }
}

/// On-demand IR intensity sampling.
pub trait IrSensors {
    /// One synchronous raw sample. Higher means closer.
    fn read(&mut self, sensor: IrSensor) -> u16;
}

/// Wheel motor actuation.
pub trait Motors {
    /// Sets the duty cycle of `wheel` without changing its direction.
    fn set_speed(&mut self, wheel: Wheel, duty: u8);

    /// Drives `wheel` forward at its current duty.
    fn start_forward(&mut self, wheel: Wheel);

    /// Drives `wheel` backward at its current duty.
    fn start_backward(&mut self, wheel: Wheel);

    /// Stops `wheel`.
    fn stop(&mut self, wheel: Wheel);
}

/// Millisecond time base.
pub trait Clock {
    /// Blocks for `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);

    /// Free-running millisecond counter. Wraps.
    fn now_ms(&self) -> u32;
}

/// Terminal fault display.
pub trait FaultIndicator {
    /// Shows the blink pattern for `kind` forever.
    fn indicate_error(&mut self, kind: FaultKind) -> !;
}
