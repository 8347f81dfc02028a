//! STM32F401RE board support for the mouse firmware.
//!
//! Everything here implements a `mouse_core::hal` trait over embassy
//! peripherals. Pin assignment:
//!
//! - Motors (TIM1 PWM): PA8/PA9 left forward/reverse, PA10/PA11 right
//!   forward/reverse
//! - IR sensors (ADC1): PA0 front left, PA1 left diagonal, PA4 right
//!   diagonal, PB0 front right
//! - Encoders (EXTI): PB4 left, PB5 right
//! - Config switch (EXTI): PC13, active low
//! - LEDs: PA5 error, PC8/PC6/PC5 status D1..D3

pub mod encoders;
pub mod leds;
pub mod motors;
pub mod sensors;

use embassy_time::{Duration, Instant, block_for};
use mouse_core::hal::Clock;

/// Blocking millisecond clock over the embassy time driver.
pub struct BoardClock;

impl Clock for BoardClock {
    fn delay_ms(&mut self, ms: u32) {
        block_for(Duration::from_millis(u64::from(ms)));
    }

    fn now_ms(&self) -> u32 {
        // Truncation gives the wrapping counter the core expects.
        Instant::now().as_millis() as u32
    }
}
