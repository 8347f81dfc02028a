//! Dual DC motor driver over TIM1 PWM.
//!
//! Each wheel has a forward and a reverse channel into the H-bridge; only
//! one of them carries duty at a time.

use embassy_stm32::gpio::OutputType;
use embassy_stm32::peripherals::{PA8, PA9, PA10, PA11, TIM1};
use embassy_stm32::time::hz;
use embassy_stm32::timer::Channel;
use embassy_stm32::timer::low_level::CountingMode;
use embassy_stm32::timer::simple_pwm::{PwmPin, SimplePwm};
use embedded_hal::Pwm;
use mouse_core::hal::{Motors, Wheel};

/// PWM frequency for motor control (20kHz - inaudible)
const PWM_FREQUENCY: u32 = 20_000;

#[derive(Clone, Copy, PartialEq)]
enum Drive {
    Forward,
    Reverse,
    Stopped,
}

/// H-bridge motor driver.
///
/// Uses TIM1 channels:
/// - CH1 (PA8): left forward
/// - CH2 (PA9): left reverse
/// - CH3 (PA10): right forward
/// - CH4 (PA11): right reverse
pub struct MotorController<'d> {
    pwm: SimplePwm<'d, TIM1>,
    max_duty: u32,
    duty: [u8; 2],
    drive: [Drive; 2],
}

impl<'d> MotorController<'d> {
    /// Configures TIM1 and leaves both wheels stopped.
    pub fn new(tim1: TIM1, pa8: PA8, pa9: PA9, pa10: PA10, pa11: PA11) -> Self {
        let mut pwm = SimplePwm::new(
            tim1,
            Some(PwmPin::new_ch1(pa8, OutputType::PushPull)),
            Some(PwmPin::new_ch2(pa9, OutputType::PushPull)),
            Some(PwmPin::new_ch3(pa10, OutputType::PushPull)),
            Some(PwmPin::new_ch4(pa11, OutputType::PushPull)),
            hz(PWM_FREQUENCY),
            CountingMode::EdgeAlignedUp,
        );

        let max_duty = pwm.get_max_duty();
        for channel in [Channel::Ch1, Channel::Ch2, Channel::Ch3, Channel::Ch4] {
            pwm.enable(channel);
            pwm.set_duty(channel, 0);
        }

        Self {
            pwm,
            max_duty,
            duty: [0; 2],
            drive: [Drive::Stopped; 2],
        }
    }

    fn channels(wheel: Wheel) -> (Channel, Channel) {
        match wheel {
            Wheel::Left => (Channel::Ch1, Channel::Ch2),
            Wheel::Right => (Channel::Ch3, Channel::Ch4),
        }
    }

    /// Writes the stored duty and direction of `wheel` to the timer.
    fn apply(&mut self, wheel: Wheel) {
        let i = wheel as usize;
        let duty = self.max_duty * u32::from(self.duty[i]) / 255;
        let (fwd_ch, rev_ch) = Self::channels(wheel);

        match self.drive[i] {
            Drive::Forward => {
                self.pwm.set_duty(rev_ch, 0);
                self.pwm.set_duty(fwd_ch, duty);
            }
            Drive::Reverse => {
                self.pwm.set_duty(fwd_ch, 0);
                self.pwm.set_duty(rev_ch, duty);
            }
            Drive::Stopped => {
                self.pwm.set_duty(fwd_ch, 0);
                self.pwm.set_duty(rev_ch, 0);
            }
        }
    }

    fn start(&mut self, wheel: Wheel, drive: Drive) {
        self.drive[wheel as usize] = drive;
        self.apply(wheel);
    }
}

impl Motors for MotorController<'_> {
    fn set_speed(&mut self, wheel: Wheel, duty: u8) {
        self.duty[wheel as usize] = duty;
        // A running wheel picks up the new duty immediately.
        if self.drive[wheel as usize] != Drive::Stopped {
            self.apply(wheel);
        }
    }

    fn start_forward(&mut self, wheel: Wheel) {
        self.start(wheel, Drive::Forward);
    }

    fn start_backward(&mut self, wheel: Wheel) {
        self.start(wheel, Drive::Reverse);
    }

    fn stop(&mut self, wheel: Wheel) {
        self.start(wheel, Drive::Stopped);
    }
}
