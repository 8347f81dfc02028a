//! Edge counting tasks.
//!
//! These run on the high-priority interrupt executor so they keep counting
//! while the main loop busy-waits inside a motion primitive.

use embassy_stm32::exti::ExtiInput;
use embassy_time::Timer;
use mouse_core::odometry::{EdgeCounter, WheelEncoders};

/// Wheel encoder counts, read and cleared by the control core.
pub static ENCODERS: WheelEncoders = WheelEncoders::new();

/// Debounced config switch presses.
pub static SWITCH_PRESSES: EdgeCounter = EdgeCounter::new();

/// Time the switch must stay released before a press counts.
const BOUNCE_WINDOW_MS: u64 = 20;

/// Counts rising edges of one wheel encoder.
#[embassy_executor::task(pool_size = 2)]
pub async fn encoder_task(mut pin: ExtiInput<'static>, counter: &'static EdgeCounter) {
    loop {
        pin.wait_for_rising_edge().await;
        counter.increment();
    }
}

/// Counts presses of the active-low config switch.
#[embassy_executor::task]
pub async fn switch_task(mut pin: ExtiInput<'static>) {
    loop {
        pin.wait_for_falling_edge().await;
        pin.wait_for_high().await;
        Timer::after_millis(BOUNCE_WINDOW_MS).await;
        if pin.is_high() {
            SWITCH_PRESSES.increment();
        }
    }
}
