//! Fuzz target: `Controller::tick`
//!
//! Interprets the input as a stream of 12-byte cycle records (time step,
//! inflow, regulator, valve, button bits) and drives the controller
//! through them, asserting the pool and motor safety invariants after
//! every admitted cycle.
//!
//! cargo fuzz run fuzz_control_cycle

#![no_main]

use harvester::adapters::entropy::XorShiftEntropy;
use harvester::adapters::time::ManualClock;
use harvester::app::commands::Command;
use harvester::app::events::AppEvent;
use harvester::app::ports::{ActuatorPort, EventSink, SensorPort};
use harvester::control::context::SensorSnapshot;
use harvester::control::level::PoolLevel;
use harvester::control::motor::{Polarity, Speed};
use harvester::drivers::led_patterns::IndicatorFrame;
use harvester::{Controller, ControllerConfig};
use libfuzzer_sys::fuzz_target;

struct Rig {
    input: SensorSnapshot,
    duty: u8,
}

impl SensorPort for Rig {
    fn read_all(&mut self) -> SensorSnapshot {
        self.input
    }
}

impl ActuatorPort for Rig {
    fn drive_motor(&mut self, duty: u8, _polarity: Polarity) {
        self.duty = duty;
    }
    fn set_off_signal(&mut self, _active: bool) {}
    fn set_level_indicators(&mut self, _frame: IndicatorFrame) {}
    fn set_net_rate(&mut self, _gain: u8, _loss: u8) {}
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Some((head, records)) = data.split_first_chunk::<4>() else {
        return;
    };

    let clock = ManualClock::new(0);
    let Ok(mut c) = Controller::new(
        ControllerConfig::default(),
        &clock,
        XorShiftEntropy::new(u32::from_le_bytes(*head)),
    ) else {
        return;
    };
    let mut sink = Discard;
    c.start_from(u32::from_le_bytes(*head) % 5_000_001, &mut sink);
    c.handle_command(Command::On, &mut sink);

    let mut rig = Rig {
        input: SensorSnapshot::default(),
        duty: 0,
    };

    for rec in records.chunks_exact(12) {
        clock.advance(u32::from(u16::from_le_bytes([rec[0], rec[1]])));
        rig.input = SensorSnapshot {
            inflow: u32::from_le_bytes([rec[2], rec[3], rec[4], 0]),
            regulator: u16::from_le_bytes([rec[5], rec[6]]),
            valve: u16::from_le_bytes([rec[7], rec[8]]),
            on_pressed: rec[9] & 1 != 0,
            off_pressed: rec[9] & 2 != 0,
            toggle_pressed: rec[9] & 4 != 0,
        };
        if rec[10] & 0x80 != 0 {
            c.handle_command(Command::ALL[usize::from(rec[11]) % 3], &mut sink);
        }

        if !c.tick(&mut rig, &mut sink) {
            continue;
        }

        let pool = c.pool();
        assert!(pool.quantity() <= pool.capacity());
        if c.level() == PoolLevel::Empty || c.context().thresholds.at_cutoff(pool.quantity()) {
            assert_eq!(c.motor().speed(), Speed::Zero);
            assert_eq!(rig.duty, 0);
        }
        assert_eq!(rig.duty, c.motor().speed().duty());
    }
});
