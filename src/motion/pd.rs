//! PD loop state and signed duty commands.

use crate::config::{MAX_DUTY, PdGains};
use crate::hal::{Motors, Wheel};

/// Derivative memory of one PD loop. Gains are passed per update so one
/// loop can switch gain sets without losing its history.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pd {
    prev_error: f32,
}

impl Pd {
    #[must_use]
    pub const fn new() -> Self {
        Self { prev_error: 0.0 }
    }

    /// Feeds one error sample and returns `kp * e + kd * (e - e_prev)`.
    pub fn update(&mut self, gains: PdGains, error: f32) -> f32 {
        let derivative = error - self.prev_error;
        self.prev_error = error;
        gains.kp * error + gains.kd * derivative
    }

    /// Forgets the previous error.
    pub fn reset(&mut self) {
        self.prev_error = 0.0;
    }
}

/// Limits a signed duty to what the driver accepts.
#[must_use]
pub fn clamp_duty(duty: i32) -> i32 {
    duty.clamp(-MAX_DUTY, MAX_DUTY)
}

/// Applies a signed duty to `wheel`: the sign picks the direction.
pub fn drive(motors: &mut impl Motors, wheel: Wheel, duty: i32) {
    let duty = clamp_duty(duty);
    motors.set_speed(wheel, duty.unsigned_abs() as u8);
    if duty < 0 {
        motors.start_backward(wheel);
    } else {
        motors.start_forward(wheel);
    }
}

/// Stops both wheels.
pub fn stop_both(motors: &mut impl Motors) {
    for wheel in Wheel::BOTH {
        motors.stop(wheel);
    }
}
