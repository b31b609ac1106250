//! End-to-end safety behaviour: forced shutdowns, low-power hysteresis
//! and stochastic inflow pacing.

use harvester::adapters::entropy::XorShiftEntropy;
use harvester::adapters::time::ManualClock;
use harvester::app::commands::Command;
use harvester::app::events::AppEvent;
use harvester::app::ports::EntropySource;
use harvester::control::level::PoolLevel;
use harvester::control::motor::Speed;
use harvester::safety::ShutdownCause;
use harvester::ControllerConfig;

use crate::mock_hw::{controller, cycle, quiet_config, MockHardware, RecordingSink};

#[test]
fn draining_to_empty_forces_motor_off() {
    let clock = ManualClock::new(0);
    let config = quiet_config();
    let mut c = controller(&clock, config.clone());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(config.low_higher + 1, &mut sink);
    c.handle_command(Command::On, &mut sink);
    assert!(c.motor().is_running());

    hw.input.valve = u16::MAX;
    for _ in 0..40 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
        if c.level() == PoolLevel::Empty {
            assert_eq!(c.motor().speed(), Speed::Zero);
        }
    }

    assert_eq!(c.pool().quantity(), 0);
    assert_eq!(c.level(), PoolLevel::Empty);
    assert!(!c.motor().is_running());
    assert_eq!(hw.last_drive().map(|(duty, _)| duty), Some(0));
    assert_eq!(hw.off_signal(), Some(true));
    assert_eq!(
        sink.count(|e| *e == AppEvent::ForcedShutdown(ShutdownCause::PoolEmpty)),
        1,
        "shutdown is reported once; later cycles are no-ops"
    );
}

#[test]
fn empty_pool_rejects_turn_on_and_stays_off() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start(&mut sink);

    c.handle_command(Command::On, &mut sink);
    cycle(&mut c, &clock, &mut hw, &mut sink);
    assert_eq!(c.level(), PoolLevel::Empty);
    assert!(!c.motor().is_running());
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CommandRejected { .. })), 1);
}

#[test]
fn full_cutoff_forces_motor_off() {
    let clock = ManualClock::new(0);
    // Cutoff below capacity so it stays reachable with the motor's own draw.
    let config = ControllerConfig {
        full_cutoff: 4_500_000,
        ..quiet_config()
    };
    let mut c = controller(&clock, config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(2_000_000, &mut sink);
    c.handle_command(Command::On, &mut sink);

    hw.input.inflow = 3_000_000;
    cycle(&mut c, &clock, &mut hw, &mut sink);

    assert_eq!(c.level(), PoolLevel::Full);
    assert!(!c.motor().is_running());
    assert!(sink
        .events
        .contains(&AppEvent::ForcedShutdown(ShutdownCause::PoolFull)));
    assert!(c.pool().quantity() <= c.pool().capacity());
}

#[test]
fn full_band_below_cutoff_keeps_motor_running() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(2_000_000, &mut sink);
    c.handle_command(Command::On, &mut sink);

    hw.input.inflow = 2_200_000;
    cycle(&mut c, &clock, &mut hw, &mut sink);
    assert_eq!(c.level(), PoolLevel::Full);
    assert!(c.motor().is_running());
}

#[test]
fn low_band_pins_quarter_speed_until_pool_recovers() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(2_000_000, &mut sink);
    hw.input.regulator = 1000;
    c.handle_command(Command::On, &mut sink);

    cycle(&mut c, &clock, &mut hw, &mut sink);
    assert_eq!(c.motor().speed(), Speed::Full);

    // Drain into the Low band.
    hw.input.valve = u16::MAX;
    while c.level() != PoolLevel::Low {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    hw.input.valve = 0;

    assert!(sink.events.contains(&AppEvent::LowPowerEntered));
    assert!(c.motor().low_power());
    assert_eq!(c.motor().speed(), Speed::Quarter);
    assert_eq!(hw.last_drive().map(|(duty, _)| duty), Some(Speed::Quarter.duty()));

    // Regulator at full scale does not override low-power mode.
    cycle(&mut c, &clock, &mut hw, &mut sink);
    assert_eq!(c.motor().speed(), Speed::Quarter);

    // Recover into Ok.
    hw.input.inflow = 400_000;
    cycle(&mut c, &clock, &mut hw, &mut sink);
    hw.input.inflow = 0;

    assert_eq!(c.level(), PoolLevel::Ok);
    assert!(sink.events.contains(&AppEvent::LowPowerExited));
    assert!(!c.motor().low_power());
    assert_eq!(c.motor().speed(), Speed::Full);
}

#[test]
fn stochastic_bonus_fires_once_per_check_not_per_elapsed_period() {
    let clock = ManualClock::new(0);
    let config = ControllerConfig::default();
    let span = config.random_inflow_max + 1;
    let mut c = controller(&clock, config);
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start(&mut sink);

    // Same seed as the rig's controller.
    let mut expected = XorShiftEntropy::new(0xC0FF_EE11);
    let first = expected.next_u32() % span;
    let second = expected.next_u32() % span;

    cycle(&mut c, &clock, &mut hw, &mut sink);
    assert_eq!(c.pool().total_inflow(), 0);

    // Two full intervals pass between cycles: one bonus only.
    clock.set(2_500);
    assert!(c.tick(&mut hw, &mut sink));
    assert_eq!(c.pool().total_inflow(), u64::from(first));

    cycle(&mut c, &clock, &mut hw, &mut sink);
    assert_eq!(c.pool().total_inflow(), u64::from(first));

    clock.set(3_500);
    assert!(c.tick(&mut hw, &mut sink));
    assert_eq!(c.pool().total_inflow(), u64::from(first + second));
}
