//! Wandplay - Motion-Triggered Cat Wand Firmware
//!
//! Main firmware binary for RP2040 boards driving a servo wand. A PIR
//! sensor can start play on its own; a dashboard bridge and a voice
//! assistant bridge control the wand over a framed UART link.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::Pwm;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::Instant;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use wandplay_core::config::ServoConfig;
use wandplay_drivers::indicator::StatusLed;
use wandplay_drivers::sensor::PirSensor;
use wandplay_drivers::servo::PwmServo;
use wandplay_hal_rp2040::{servo_pwm_config, RpInput, RpOutput, RpPwm};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Wandplay firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = config::load_config();
    info!(
        "Limits {}..={}, start {}, ground {}/{}",
        config.limits.lowest,
        config.limits.highest,
        config.limits.start,
        config.limits.toy_on_ground,
        config.limits.toy_off_ground
    );

    // Status LED, lit until the first play state update
    // Pin assignment is board-specific (Pico onboard LED: GPIO25)
    let led = StatusLed::new(RpOutput::new(Output::new(p.PIN_25, Level::Low)), false);

    // Setup UART for the bridge link
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for bridge link");

    // Servo on PWM slice 7 output A
    // Pin assignment is board-specific (GPIO14)
    let pwm_config = match servo_pwm_config(config.servo.frequency_hz) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("Servo PWM config rejected ({:?}), using default frame rate", e);
            unwrap!(servo_pwm_config(ServoConfig::default().frequency_hz))
        }
    };
    let pwm = Pwm::new_output_a(p.PWM_SLICE7, p.PIN_14, pwm_config.clone());
    let servo = PwmServo::new(RpPwm::new(pwm, pwm_config), &config.servo);

    info!("Servo PWM initialized at {} Hz", config.servo.frequency_hz);

    // PIR motion sensor, active high
    // Pin assignment is board-specific (GPIO12)
    let pir = PirSensor::new_active_high(RpInput::new(Input::new(p.PIN_12, Pull::Down)));

    info!("Motion sensor initialized");

    // Boot time in ticks varies with clock start-up and UART setup
    let seed = Instant::now().as_ticks();

    spawner.spawn(tasks::link_rx_task(rx)).unwrap();
    spawner.spawn(tasks::link_tx_task(tx)).unwrap();
    spawner.spawn(tasks::motion_sensor_task(pir)).unwrap();
    spawner
        .spawn(tasks::stats_task(config.timing.stats_interval_ms))
        .unwrap();
    spawner
        .spawn(tasks::controller_task(config, servo, led, seed))
        .unwrap();

    info!("All tasks spawned, firmware running");

    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
