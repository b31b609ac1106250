//! Button → debounce → motor command pipeline.

use harvester::adapters::time::ManualClock;
use harvester::app::commands::Command;
use harvester::app::events::AppEvent;
use harvester::control::motor::{Direction, Polarity, Speed};
use harvester::error::MotorError;

use crate::mock_hw::{controller, cycle, quiet_config, MockHardware, RecordingSink};

const OK_QUANTITY: u32 = 2_000_000;

fn is_command_event(e: &AppEvent) -> bool {
    matches!(
        e,
        AppEvent::MotorStarted { .. }
            | AppEvent::MotorStopped
            | AppEvent::DirectionChanged(_)
            | AppEvent::CommandIgnored { .. }
            | AppEvent::CommandRejected { .. }
    )
}

#[test]
fn held_on_button_starts_motor_from_regulator_band() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(OK_QUANTITY, &mut sink);

    hw.input.regulator = 600;
    hw.input.on_pressed = true;
    // 25 ms: edge seen; 50 ms: 25 ms stable; 75 ms: 50 ms stable → fires.
    cycle(&mut c, &clock, &mut hw, &mut sink);
    cycle(&mut c, &clock, &mut hw, &mut sink);
    assert!(!c.motor().is_running());
    cycle(&mut c, &clock, &mut hw, &mut sink);

    assert!(sink.events.contains(&AppEvent::MotorStarted {
        speed: Speed::ThreeQuarter,
        direction: Direction::Clockwise,
    }));
    assert_eq!(
        hw.last_drive(),
        Some((191, Polarity { in1: true, in2: false }))
    );
    assert_eq!(hw.off_signal(), Some(false));

    // Holding the button does not fire again.
    for _ in 0..20 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    assert_eq!(sink.count(is_command_event), 1);
}

#[test]
fn toggle_flips_direction_of_running_motor() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(OK_QUANTITY, &mut sink);
    c.handle_command(Command::On, &mut sink);
    let speed = c.motor().speed();

    hw.input.toggle_pressed = true;
    for _ in 0..3 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }

    assert_eq!(c.motor().direction(), Direction::CounterClockwise);
    assert_eq!(c.motor().speed(), speed);
    assert!(sink
        .events
        .contains(&AppEvent::DirectionChanged(Direction::CounterClockwise)));
    assert_eq!(
        hw.last_drive(),
        Some((speed.duty(), Polarity { in1: false, in2: true }))
    );
}

#[test]
fn second_turn_on_is_ignored_without_state_change() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut sink = RecordingSink::new();
    c.start_from(OK_QUANTITY, &mut sink);

    c.handle_command(Command::On, &mut sink);
    let (speed, direction) = (c.motor().speed(), c.motor().direction());
    sink.clear();

    c.handle_command(Command::On, &mut sink);
    assert_eq!(
        sink.events,
        [AppEvent::CommandIgnored {
            command: Command::On,
            reason: MotorError::AlreadyRunning
        }]
    );
    assert_eq!(c.motor().speed(), speed);
    assert_eq!(c.motor().direction(), direction);
}

#[test]
fn turn_on_rejected_at_low_higher_and_accepted_just_above() {
    let config = quiet_config();
    let clock = ManualClock::new(0);

    let mut c = controller(&clock, config.clone());
    let mut sink = RecordingSink::new();
    c.start_from(config.low_higher, &mut sink);
    c.handle_command(Command::On, &mut sink);
    assert_eq!(
        sink.events.last(),
        Some(&AppEvent::CommandRejected {
            command: Command::On,
            reason: MotorError::UnsafeLevel {
                quantity: config.low_higher
            }
        })
    );
    assert!(!c.motor().is_running());

    let mut c = controller(&clock, config.clone());
    c.start_from(config.low_higher + 1, &mut sink);
    c.handle_command(Command::On, &mut sink);
    assert!(c.motor().is_running());
}

#[test]
fn off_and_toggle_on_stopped_motor_are_warnings() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut sink = RecordingSink::new();
    c.start(&mut sink);
    sink.clear();

    c.handle_command(Command::Off, &mut sink);
    c.handle_command(Command::Toggle, &mut sink);
    assert_eq!(
        sink.events,
        [
            AppEvent::CommandIgnored {
                command: Command::Off,
                reason: MotorError::AlreadyStopped
            },
            AppEvent::CommandIgnored {
                command: Command::Toggle,
                reason: MotorError::NotRunning
            },
        ]
    );
}

#[test]
fn chattering_button_never_fires() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(OK_QUANTITY, &mut sink);

    // Level flips every 25 ms cycle, always inside the 50 ms window.
    for i in 0..80 {
        hw.input.on_pressed = i % 2 == 0;
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    assert_eq!(sink.count(is_command_event), 0);
    assert!(!c.motor().is_running());

    // Then held steady: fires exactly once.
    hw.input.on_pressed = true;
    for _ in 0..10 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    assert_eq!(sink.count(is_command_event), 1);
    assert!(c.motor().is_running());
}

#[test]
fn release_does_not_fire() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(OK_QUANTITY, &mut sink);
    c.handle_command(Command::On, &mut sink);
    sink.clear();

    hw.input.off_pressed = true;
    for _ in 0..4 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    assert!(sink.events.contains(&AppEvent::MotorStopped));
    sink.clear();

    hw.input.off_pressed = false;
    for _ in 0..10 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    assert_eq!(sink.count(is_command_event), 0);
    assert_eq!(hw.off_signal(), Some(true));
}
