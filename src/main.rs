//! Harvester firmware: main entry point (ESP32-S3, ESP-IDF).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │                                                              │
//! │  HardwareAdapter     LogEventSink   SystemClock   Hardware-  │
//! │  (Sensor+Actuator)   (EventSink)    (Clock)       Entropy    │
//! │                                                              │
//! │  ─────────────── Port Trait Boundary ──────────────────      │
//! │                                                              │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │             Controller (pure logic)                    │  │
//! │  │  Gate · Pool · Level · Motor · Safety · Indicators     │  │
//! │  └────────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pin map
//!
//! | Signal              | GPIO | Peripheral          |
//! |---------------------|------|---------------------|
//! | Energy source       | 1    | ADC1                |
//! | Speed regulator     | 2    | ADC1                |
//! | Release valve       | 3    | ADC1                |
//! | Motor enable        | 4    | LEDC ch0 (timer0)   |
//! | Motor off tone      | 5    | LEDC ch1 (timer1)   |
//! | Bridge in1 / in2    | 13/14| GPIO out            |
//! | Level LEDs L/O/H/C  | 6-9  | GPIO out            |
//! | Net gain / loss LED | 15/16| LEDC ch2/ch3        |
//! | On / Off / Toggle   | 10-12| GPIO in, pull-down  |

use anyhow::Result;
use esp_idf_hal::adc::attenuation::DB_11;
use esp_idf_hal::adc::oneshot::config::AdcChannelConfig;
use esp_idf_hal::adc::oneshot::{AdcChannelDriver, AdcDriver};
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::ledc::config::TimerConfig;
use esp_idf_hal::ledc::{LedcDriver, LedcTimerDriver, Resolution};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::FromValueType;
use log::{info, warn};

use harvester::adapters::entropy::HardwareEntropy;
use harvester::adapters::hardware::HardwareAdapter;
use harvester::adapters::log_sink::LogEventSink;
use harvester::adapters::time::SystemClock;
use harvester::drivers::indicators::{LevelLeds, NetRateLeds};
use harvester::drivers::motor_drive::{MotorDrive, OffSignal};
use harvester::sensors::SensorHub;
use harvester::{Controller, ControllerConfig};

/// 12-bit ADC counts down to the 10-bit scale the controller works in.
const ADC_SHIFT: u32 = 2;

/// Wrap a fallible ADC read as an infallible analog channel.
fn analog<'a, E: core::fmt::Display>(
    mut read: impl FnMut() -> core::result::Result<u16, E> + 'a,
    label: &'static str,
) -> Box<dyn FnMut() -> u16 + 'a> {
    Box::new(move || match read() {
        Ok(raw) => raw >> ADC_SHIFT,
        Err(e) => {
            warn!("{label} ADC read failed: {e}");
            0
        }
    })
}

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Harvester v{}                       ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = ControllerConfig::default();
    let p = Peripherals::take()?;

    // ── 2. Analog inputs ──────────────────────────────────────
    let adc = AdcDriver::new(p.adc1)?;
    let chan_cfg = AdcChannelConfig {
        attenuation: DB_11,
        ..Default::default()
    };
    let mut source = AdcChannelDriver::new(&adc, p.pins.gpio1, &chan_cfg)?;
    let mut regulator = AdcChannelDriver::new(&adc, p.pins.gpio2, &chan_cfg)?;
    let mut valve = AdcChannelDriver::new(&adc, p.pins.gpio3, &chan_cfg)?;

    // ── 3. Buttons ────────────────────────────────────────────
    let button = |pin: AnyInputPin| -> Result<PinDriver<'static, AnyInputPin, Input>> {
        let mut drv = PinDriver::input(pin)?;
        drv.set_pull(Pull::Down)?;
        Ok(drv)
    };
    let buttons = [
        button(p.pins.gpio10.downgrade_input())?,
        button(p.pins.gpio11.downgrade_input())?,
        button(p.pins.gpio12.downgrade_input())?,
    ];

    let sensor_hub = SensorHub::new(
        analog(move || source.read(), "source"),
        analog(move || regulator.read(), "regulator"),
        analog(move || valve.read(), "valve"),
        buttons,
        config.analog_read_max,
    );

    // ── 4. Outputs ────────────────────────────────────────────
    let output = |pin: AnyOutputPin| PinDriver::output(pin);

    let pwm_timer = LedcTimerDriver::new(
        p.ledc.timer0,
        &TimerConfig::new()
            .frequency(25.kHz().into())
            .resolution(Resolution::Bits8),
    )?;
    let tone_timer = LedcTimerDriver::new(
        p.ledc.timer1,
        &TimerConfig::new()
            .frequency(config.motor_off_tone_hz.Hz())
            .resolution(Resolution::Bits8),
    )?;

    let motor = MotorDrive::new(
        LedcDriver::new(p.ledc.channel0, &pwm_timer, p.pins.gpio4)?,
        output(p.pins.gpio13.downgrade_output())?,
        output(p.pins.gpio14.downgrade_output())?,
    );
    let off_signal = OffSignal::new(LedcDriver::new(p.ledc.channel1, &tone_timer, p.pins.gpio5)?);
    let level_leds = LevelLeds::new([
        output(p.pins.gpio6.downgrade_output())?,
        output(p.pins.gpio7.downgrade_output())?,
        output(p.pins.gpio8.downgrade_output())?,
        output(p.pins.gpio9.downgrade_output())?,
    ]);
    let net_rate = NetRateLeds::new(
        LedcDriver::new(p.ledc.channel2, &pwm_timer, p.pins.gpio15)?,
        LedcDriver::new(p.ledc.channel3, &pwm_timer, p.pins.gpio16)?,
        config.analog_write_max,
    );

    let mut hw = HardwareAdapter::new(sensor_hub, motor, off_signal, level_leds, net_rate);
    let mut log_sink = LogEventSink::new();

    // ── 5. Controller ─────────────────────────────────────────
    let mut controller = Controller::new(config, SystemClock::new(), HardwareEntropy::new())?;
    controller.start(&mut log_sink);

    info!("System ready. Entering control loop.");

    // ── 6. Control loop ───────────────────────────────────────
    // The cycle gate paces the pipeline; the 1 ms delay only yields to
    // the idle task so the task watchdog stays fed.
    loop {
        controller.tick(&mut hw, &mut log_sink);
        FreeRtos::delay_ms(1);
    }
}
