//! Knob value/angle regression tests
//!
//! The knob must behave like a native range input: values clamp to
//! [min, max], round to the step's precision, and the rotation extremes
//! always reach exactly min and max.

use gnob::bus::{create_bus, KnobEvent};
use gnob::engine::{AngularRange, Knob, KnobConfig, KnobEngine, KnobError};

fn config(min: f64, max: f64, step: f64, initial: f64) -> KnobConfig {
    KnobConfig::new(min, max, step, initial, AngularRange::DEGREES).expect("valid config")
}

fn knob(min: f64, max: f64, step: f64, initial: f64) -> Knob {
    Knob::new(config(min, max, step, initial), create_bus())
}

// =============================================================================
// Scenarios: default 0..10 knob
// =============================================================================

#[test]
fn half_span_rotation_lands_on_midpoint() {
    let mut knob = knob(0.0, 10.0, 1.0, 0.0);
    knob.rotate_by(145.0).expect("finite delta");
    assert_eq!(knob.value(), 5.0);
}

#[test]
fn over_rotation_clamps_at_max() {
    let mut knob = knob(0.0, 10.0, 1.0, 0.0);
    knob.rotate_by(1000.0).expect("finite delta");
    assert_eq!(knob.value(), 10.0);
    assert_eq!(knob.angle(), 100.0);
}

#[test]
fn negative_value_clamps_to_min() {
    let mut knob = knob(0.0, 10.0, 1.0, 5.0);
    assert_eq!(knob.set_value(-3.0), Ok(0.0));
    assert_eq!(knob.angle(), -190.0);
}

#[test]
fn values_above_max_clamp_to_max() {
    let mut knob = knob(0.0, 10.0, 1.0, 0.0);
    assert_eq!(knob.set_value(11.0), Ok(10.0));
    assert_eq!(knob.set_value(f64::INFINITY), Ok(10.0));
}

// =============================================================================
// Scenarios: fractional step
// =============================================================================

#[test]
fn quarter_step_resolves_two_digit_precision() {
    let config = config(0.0, 1.0, 0.25, 0.0);
    assert_eq!(config.precision, 2);
}

#[test]
fn quarter_step_keeps_values_within_precision() {
    let mut knob = knob(0.0, 1.0, 0.25, 0.0);
    assert_eq!(knob.set_value(0.3), Ok(0.3));
    assert_eq!(knob.set_value(0.33333), Ok(0.33));
}

#[test]
fn in_range_values_read_back_rounded() {
    let mut knob = knob(-2.0, 2.0, 0.1, 0.0);
    for candidate in [-2.0, -1.25, -0.04, 0.0, 0.55, 1.96, 2.0] {
        let stored = knob.set_value(candidate).expect("numeric value");
        let expected = (candidate * 10.0_f64).round() / 10.0;
        assert!(
            (stored - expected).abs() < 1e-12,
            "set_value({}) stored {}, expected {}",
            candidate,
            stored,
            expected
        );
    }
}

#[test]
fn huge_in_range_values_are_not_pushed_to_max() {
    let mut knob = knob(0.0, 1e308, 0.5, 0.0);
    assert_eq!(knob.set_value(5e307), Ok(5e307));
    assert_eq!(knob.set_value(1e308), Ok(1e308));
    assert_eq!(knob.set_value(2.25), Ok(2.3));
}

#[test]
fn bounds_off_the_precision_grid_are_stored_exactly() {
    let mut knob = knob(0.123, 1.0, 0.1, 0.123);
    assert_eq!(knob.value(), 0.123);
    assert_eq!(knob.set_value(0.12), Ok(0.123));
    assert_eq!(knob.set_value(0.16), Ok(0.2));
    assert_eq!(knob.angle(), knob.engine().angle_for(0.2));
}

#[test]
fn overflowing_range_width_is_rejected() {
    let result = KnobConfig::new(-1e308, 1e308, 1.0, 0.0, AngularRange::DEGREES);
    assert!(matches!(result, Err(KnobError::InvalidConfig(_))));
}

// =============================================================================
// Invalid input
// =============================================================================

#[test]
fn nan_is_a_silent_no_op() {
    let mut knob = knob(0.0, 10.0, 1.0, 4.0);
    let before = knob.state();

    assert!(matches!(
        knob.set_value(f64::NAN),
        Err(KnobError::InvalidValue(_))
    ));
    assert!(knob.set_value_text("").is_err());
    assert!(knob.set_value_text("abc").is_err());

    assert_eq!(knob.state(), before);
}

#[test]
fn zero_is_accepted() {
    let mut knob = knob(-5.0, 5.0, 1.0, 3.0);
    assert_eq!(knob.set_value(0.0), Ok(0.0));
    assert_eq!(knob.set_value_text("0"), Ok(0.0));
}

#[test]
fn set_value_is_idempotent() {
    let mut knob = knob(0.0, 10.0, 1.0, 0.0);
    knob.set_value(7.0).expect("numeric value");
    let first = knob.state();
    knob.set_value(7.0).expect("numeric value");
    assert_eq!(knob.state(), first);
}

// =============================================================================
// Tick table
// =============================================================================

#[test]
fn ticks_are_deterministic() {
    let a = KnobEngine::new(config(0.0, 1.0, 0.25, 0.0));
    let b = KnobEngine::new(config(0.0, 1.0, 0.25, 0.0));
    assert_eq!(a.ticks(), b.ticks());
    assert_eq!(a.ticks(), a.ticks());
}

#[test]
fn ticks_cover_the_span_and_never_decrease() {
    for range in [AngularRange::DEGREES, AngularRange::LINEAR] {
        let config = KnobConfig::new(0.0, 7.5, 0.5, 0.0, range).expect("valid config");
        let engine = KnobEngine::new(config);
        let ticks = engine.ticks();
        assert_eq!(ticks.len(), range.span() as usize);
        assert!(ticks.values().windows(2).all(|w| w[0] <= w[1]));
    }
}

// =============================================================================
// Boundary snap and round trip
// =============================================================================

#[test]
fn angular_bounds_snap_to_min_and_max() {
    // Awkward steps leave the last table band short of max
    for (min, max, step) in [(0.0, 10.0, 1.0), (0.0, 1.1, 0.25), (-3.0, 7.0, 0.3)] {
        let mut knob = knob(min, max, step, min);
        knob.rotate_by(10_000.0).expect("finite delta");
        assert_eq!(knob.value(), max, "max bound for {}..{}/{}", min, max, step);
        knob.rotate_by(-10_000.0).expect("finite delta");
        assert_eq!(knob.value(), min, "rest bound for {}..{}/{}", min, max, step);
    }
}

#[test]
fn round_trip_moves_at_most_one_tick() {
    let mut knob = knob(0.0, 10.0, 1.0, 0.0);
    let units_per_step = AngularRange::DEGREES.span() / 10.0;

    for _ in 0..40 {
        knob.rotate_by(7.3).expect("finite delta");
        let turned = knob.angle();
        let value = knob.value();

        let mut replay = self::knob(0.0, 10.0, 1.0, 0.0);
        replay.set_value(value).expect("numeric value");

        assert_eq!(replay.value(), value);
        assert!(
            (replay.angle() - turned).abs() <= units_per_step,
            "angle {} re-derived as {} for value {}",
            turned,
            replay.angle(),
            value
        );
    }
}

#[test]
fn linear_range_maps_like_degrees() {
    let config = KnobConfig::new(0.0, 10.0, 1.0, 0.0, AngularRange::LINEAR).expect("valid config");
    let mut knob = Knob::new(config, create_bus());
    assert_eq!(knob.angle(), 0.0);
    // 29.5 position units per step
    knob.rotate_by(148.0).expect("finite delta");
    assert_eq!(knob.value(), 5.0);
    knob.rotate_by(147.0).expect("finite delta");
    assert_eq!(knob.value(), 10.0);
}

// =============================================================================
// Change notification
// =============================================================================

#[test]
fn every_accepted_change_is_published_once() {
    let bus = create_bus();
    let mut rx = bus.subscribe();
    let mut knob = Knob::new(config(0.0, 10.0, 1.0, 0.0), bus);

    // Initial value
    assert_eq!(
        rx.try_recv().expect("initial event"),
        KnobEvent::ValueChanged {
            value: 0.0,
            angle: -190.0
        }
    );

    knob.rotate_by(145.0).expect("finite delta");
    knob.set_value(f64::NAN).expect_err("nan rejected");
    knob.set_value(2.0).expect("numeric value");

    assert_eq!(
        rx.try_recv().expect("rotation event"),
        KnobEvent::ValueChanged {
            value: 5.0,
            angle: -45.0
        }
    );
    assert_eq!(
        rx.try_recv().expect("set event"),
        KnobEvent::ValueChanged {
            value: 2.0,
            angle: -132.0
        }
    );
    assert!(rx.try_recv().is_err(), "rejected input must not publish");
}

#[test]
fn knob_without_listener_keeps_working() {
    let mut knob = knob(0.0, 10.0, 1.0, 0.0);
    assert_eq!(knob.bus().subscriber_count(), 0);
    assert_eq!(knob.step_by(1), Ok(1.0));
    assert_eq!(knob.step_by(-2), Ok(0.0));
}
