//! Log cadence: telemetry snapshots, windowed deltas and indicator outputs.

use harvester::adapters::json_sink::JsonLineSink;
use harvester::adapters::time::ManualClock;
use harvester::app::commands::Command;
use harvester::app::events::AppEvent;
use harvester::app::ports::EventSink;
use harvester::control::level::PoolLevel;
use harvester::control::motor::Direction;
use harvester::control::pool::PoolDeltas;
use harvester::drivers::led_patterns::IndicatorFrame;

use crate::mock_hw::{controller, cycle, quiet_config, MockHardware, RecordingSink};

/// 3000 ms log interval / 25 ms stability interval.
const CYCLES_PER_LOG: usize = 120;

#[test]
fn telemetry_reports_window_deltas_at_log_cadence() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(2_000_000, &mut sink);
    hw.input.regulator = 1000;
    c.handle_command(Command::On, &mut sink);

    hw.input.inflow = 100;
    for _ in 0..CYCLES_PER_LOG - 1 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    assert!(sink.telemetry().is_empty());
    assert!(hw.net_rate_writes().is_empty());

    cycle(&mut c, &clock, &mut hw, &mut sink);
    let t = sink.telemetry();
    assert_eq!(t.len(), 1);
    let t = t[0];

    let cycles = CYCLES_PER_LOG as u64;
    assert_eq!(
        t.deltas,
        PoolDeltas {
            quantity: (100 - 255) * cycles as i64,
            inflow: 100 * cycles,
            consumed: 255 * cycles,
            released: 0,
        }
    );
    assert!(t.motor_on);
    assert_eq!(t.speed_percent, 100);
    assert_eq!(t.direction, Direction::Clockwise);
    assert_eq!(t.level, PoolLevel::Ok);
    assert_eq!(t.quantity, 2_000_000 - 155 * CYCLES_PER_LOG as u32);
    assert_eq!(t.capacity, 5_000_000);
    assert_eq!(t.valve_open_percent, 0);
    assert!(!t.low_power);

    // |−18_600| of 150_000 → 31 on the loss channel.
    assert_eq!(hw.net_rate_writes(), [(0, 31)]);
}

#[test]
fn second_window_only_counts_its_own_cycles() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(2_000_000, &mut sink);

    hw.input.inflow = 10;
    for _ in 0..CYCLES_PER_LOG {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    hw.input.inflow = 0;
    hw.input.valve = 512;
    for _ in 0..CYCLES_PER_LOG {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }

    let t = sink.telemetry();
    assert_eq!(t.len(), 2);
    assert_eq!(t[0].deltas.inflow, 1_200);
    assert_eq!(t[1].deltas.inflow, 0);
    assert_eq!(t[1].deltas.released, 512 * CYCLES_PER_LOG as u64);
    assert_eq!(t[1].valve_open_percent, 50);
    assert!(!t[1].motor_on);
    assert_eq!(t[1].speed_percent, 0);

    let writes = hw.net_rate_writes();
    assert_eq!(writes.len(), 2);
    assert!(writes[0].0 > 0 && writes[0].1 == 0, "gain window");
    assert!(writes[1].0 == 0 && writes[1].1 > 0, "loss window");
}

#[test]
fn level_indicator_blinks_for_ok_band() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start_from(2_000_000, &mut sink);

    // First toggle of the Ok channel lands at 1000 ms (cycle 40).
    for _ in 0..39 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    assert_eq!(hw.last_frame(), Some(IndicatorFrame::default()));
    cycle(&mut c, &clock, &mut hw, &mut sink);
    assert_eq!(
        hw.last_frame(),
        Some(IndicatorFrame {
            ok: true,
            ..IndicatorFrame::default()
        })
    );
    for _ in 0..40 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
    }
    assert_eq!(hw.last_frame(), Some(IndicatorFrame::default()));
}

#[test]
fn empty_pool_shows_steady_low_indicator() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = RecordingSink::new();
    c.start(&mut sink);
    for _ in 0..10 {
        cycle(&mut c, &clock, &mut hw, &mut sink);
        assert_eq!(
            hw.last_frame(),
            Some(IndicatorFrame {
                low: true,
                ..IndicatorFrame::default()
            })
        );
    }
}

#[test]
fn events_stream_as_json_lines() {
    let clock = ManualClock::new(0);
    let mut c = controller(&clock, quiet_config());
    let mut hw = MockHardware::new();
    let mut sink = JsonLineSink::new(String::new());
    c.start_from(2_000_000, &mut sink);
    for _ in 0..CYCLES_PER_LOG {
        clock.advance(25);
        c.tick(&mut hw, &mut sink);
    }
    sink.emit(&AppEvent::MotorStopped);

    let out = sink.into_inner();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], r#"{"event":"Started","data":"Ok"}"#);
    assert!(lines[1].starts_with(r#"{"event":"Telemetry","data":{"motor_on":false"#));
    assert!(lines[1].contains(r#""level":"Ok""#));
}
