//! Squaring up against the wall ahead.

use crate::error::Peripheral;
use crate::hal::{Clock, IrSensor, IrSensors, Motors, Odometry, Wheel};
use crate::mouse::Mouse;
use crate::watchdog::Watchdog;

use super::pd::stop_both;

/// How an alignment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdjustOutcome {
    /// Rotated until the front sensors agreed.
    Aligned,
    /// The front sensors already agreed; nothing moved.
    AlreadyAligned,
    /// The sensors never agreed within the poll budget.
    TimedOut,
}

impl<M, S, O, C> Mouse<M, S, O, C>
where
    M: Motors,
    S: IrSensors,
    O: Odometry,
    C: Clock,
{
    /// Rotates in place until both front sensors read within tolerance of
    /// each other. The side reading higher is the one nearer the wall, so
    /// that wheel backs up.
    pub fn align_to_front_wall(&mut self) -> AdjustOutcome {
        let tolerance = self.config.adjust_tolerance;
        let (front_left, front_right) = front_pair(&mut self.sensors);
        if front_left.abs_diff(front_right) <= tolerance {
            return AdjustOutcome::AlreadyAligned;
        }

        let (backward, forward) = if front_left > front_right {
            (Wheel::Left, Wheel::Right)
        } else {
            (Wheel::Right, Wheel::Left)
        };
        for wheel in Wheel::BOTH {
            self.motors.set_speed(wheel, self.config.adjust_speed);
        }
        self.motors.start_backward(backward);
        self.motors.start_forward(forward);

        let sensors = &mut self.sensors;
        let result = Watchdog::new(Peripheral::FrontAlignment, self.config.adjust_max_polls)
            .wait_until(|| {
                let (left, right) = front_pair(sensors);
                left.abs_diff(right) <= tolerance
            });

        stop_both(&mut self.motors);
        self.clear_edge_counts();

        match result {
            Ok(polls) => {
                debug!("aligned to front wall after {} polls", polls);
                AdjustOutcome::Aligned
            }
            Err(err) => {
                warn!("front alignment gave up: {}", err);
                AdjustOutcome::TimedOut
            }
        }
    }
}

fn front_pair(sensors: &mut impl IrSensors) -> (u16, u16) {
    (
        sensors.read(IrSensor::FrontLeft),
        sensors.read(IrSensor::FrontRight),
    )
}
