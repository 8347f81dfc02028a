#![no_std]
#![no_main]

mod board;

use defmt::{error, info};
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::Config;
use embassy_stm32::adc::Adc;
use embassy_stm32::exti::ExtiInput;
use embassy_stm32::gpio::{Level, Output, Pull, Speed};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

use mouse_core::hal::FaultIndicator;
use mouse_core::{
    ConfigSwitch, Explorer, FaultKind, Hand, MAZE_LENGTH, Mouse, MouseConfig, RunMode,
    WallFollower,
};

use board::BoardClock;
use board::encoders::{ENCODERS, SWITCH_PRESSES, encoder_task, switch_task};
use board::leds::StatusLeds;
use board::motors::MotorController;
use board::sensors::IrArray;

/// How long the config switch is watched at power-up.
const MODE_SELECT_WINDOW_MS: u32 = 3000;

/// Delay between sensor debug reports.
const SENSOR_DEBUG_PERIOD_MS: u64 = 500;

static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

#[interrupt]
unsafe fn SPI3() {
    unsafe { EXECUTOR_HIGH.on_interrupt() }
}

defmt::timestamp!("{=u64}", { embassy_time::Instant::now().as_millis() });

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_stm32::init(Config::default());

    info!("=== Micromouse ===");

    let mut leds = StatusLeds::new(
        Output::new(p.PA5, Level::Low, Speed::Low),
        [
            Output::new(p.PC8, Level::Low, Speed::Low),
            Output::new(p.PC6, Level::Low, Speed::Low),
            Output::new(p.PC5, Level::Low, Speed::Low),
        ],
    );

    // Edge counting preempts the blocking main loop.
    interrupt::SPI3.set_priority(Priority::P6);
    let spawner = EXECUTOR_HIGH.start(interrupt::SPI3);
    let left = ExtiInput::new(p.PB4, p.EXTI4, Pull::None);
    let right = ExtiInput::new(p.PB5, p.EXTI5, Pull::None);
    let button = ExtiInput::new(p.PC13, p.EXTI13, Pull::Up);
    let spawned = spawner
        .spawn(encoder_task(left, &ENCODERS.left))
        .and_then(|()| spawner.spawn(encoder_task(right, &ENCODERS.right)))
        .and_then(|()| spawner.spawn(switch_task(button)));
    if spawned.is_err() {
        error!("could not spawn edge counting tasks");
        leds.indicate_error(FaultKind::Timer);
    }
    info!("Encoders and config switch initialized");

    // TIM1: PA8=CH1, PA9=CH2, PA10=CH3, PA11=CH4
    let motors = MotorController::new(p.TIM1, p.PA8, p.PA9, p.PA10, p.PA11);
    let sensors = IrArray::new(Adc::new(p.ADC1), p.PA0, p.PA1, p.PA4, p.PB0);
    info!("Motors and IR sensors initialized");

    let mut clock = BoardClock;
    info!("Press the config switch to pick a run mode");
    let mode = ConfigSwitch::new(&SWITCH_PRESSES).select_run_mode(&mut clock, MODE_SELECT_WINDOW_MS);

    let mut mouse = Mouse::new(motors, sensors, &ENCODERS, clock, MouseConfig::default());

    match mode {
        RunMode::Explore => {
            let mut explorer = Explorer::<MAZE_LENGTH>::new();
            match explorer.run(&mut mouse) {
                Ok(moves) => info!("goal reached after {} moves", moves),
                Err(err) => {
                    error!("exploration failed: {}", err);
                    leds.indicate_error(err.fault_kind());
                }
            }
        }
        RunMode::LeftWallFollow | RunMode::RightWallFollow => {
            let hand = if mode == RunMode::LeftWallFollow {
                Hand::Left
            } else {
                Hand::Right
            };
            let follower = WallFollower::new(hand);
            loop {
                follower.step(&mut mouse);
            }
        }
        RunMode::Demo => {
            let outcome = mouse.run_demo();
            info!("demo run finished: {}", outcome);
        }
        RunMode::SensorDebug => loop {
            mouse.report_walls();
            Timer::after_millis(SENSOR_DEBUG_PERIOD_MS).await;
        },
    }

    loop {
        Timer::after_millis(1000).await;
    }
}
