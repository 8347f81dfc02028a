//! Error and status LEDs.

use embassy_stm32::gpio::Output;
use embassy_time::{Duration, block_for};
use mouse_core::fault::{BLINK_HALF_PERIOD_MS, FaultKind};
use mouse_core::hal::FaultIndicator;

/// Error LED plus the three status LEDs D1..D3.
pub struct StatusLeds<'d> {
    error: Output<'d>,
    status: [Output<'d>; 3],
}

impl<'d> StatusLeds<'d> {
    /// Takes the LEDs and switches them all off.
    pub fn new(mut error: Output<'d>, mut status: [Output<'d>; 3]) -> Self {
        error.set_low();
        for led in &mut status {
            led.set_low();
        }
        Self { error, status }
    }
}

impl FaultIndicator for StatusLeds<'_> {
    fn indicate_error(&mut self, kind: FaultKind) -> ! {
        self.error.set_high();
        let pattern = kind.blink_pattern();
        loop {
            for (led, &lit) in self.status.iter_mut().zip(&pattern) {
                if lit {
                    led.toggle();
                }
            }
            block_for(Duration::from_millis(u64::from(BLINK_HALF_PERIOD_MS)));
        }
    }
}
