//! IR proximity sensors on ADC1.
//!
//! Higher readings mean more reflected light, so a closer wall. The ADC runs
//! at 10 bits, the scale the wall thresholds are calibrated in.
//!
//! Pin Mapping (ADC1 channels):
//! - IR1 front left: PA0 (ADC1_IN0)
//! - IR2 left diagonal: PA1 (ADC1_IN1)
//! - IR3 right diagonal: PA4 (ADC1_IN4)
//! - IR4 front right: PB0 (ADC1_IN8)

use embassy_stm32::adc::{Adc, Resolution};
use embassy_stm32::peripherals::{ADC1, PA0, PA1, PA4, PB0};
use mouse_core::hal::{IrSensor, IrSensors};

/// Four-channel IR sensor array.
pub struct IrArray<'d> {
    adc: Adc<'d, ADC1>,
    front_left: PA0,
    left_diagonal: PA1,
    right_diagonal: PA4,
    front_right: PB0,
}

impl<'d> IrArray<'d> {
    pub fn new(mut adc: Adc<'d, ADC1>, pa0: PA0, pa1: PA1, pa4: PA4, pb0: PB0) -> Self {
        adc.set_resolution(Resolution::BITS10);
        Self {
            adc,
            front_left: pa0,
            left_diagonal: pa1,
            right_diagonal: pa4,
            front_right: pb0,
        }
    }
}

impl IrSensors for IrArray<'_> {
    fn read(&mut self, sensor: IrSensor) -> u16 {
        match sensor {
            IrSensor::FrontLeft => self.adc.blocking_read(&mut self.front_left),
            IrSensor::LeftDiagonal => self.adc.blocking_read(&mut self.left_diagonal),
            IrSensor::RightDiagonal => self.adc.blocking_read(&mut self.right_diagonal),
            IrSensor::FrontRight => self.adc.blocking_read(&mut self.front_right),
        }
    }
}
