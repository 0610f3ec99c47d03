//! Headless control tests
//!
//! Keyboard, popover and wheel wiring around the engine. Popover visibility
//! belongs to the control; the engine only ever sees values and deltas.

use gnob::bus::create_bus;
use gnob::config::{KnobOptions, KnobSize};
use gnob::control::{Key, KnobControl};
use gnob::engine::KnobError;
use gnob::wheel::{RawWheelEvent, WheelNormalizer, WheelSupport};

fn control_with(options: KnobOptions, support: WheelSupport) -> KnobControl {
    KnobControl::new(&options, WheelNormalizer::new(support), create_bus())
        .expect("valid options")
}

fn control(options: KnobOptions) -> KnobControl {
    control_with(options, WheelSupport::Wheel)
}

// =============================================================================
// Keyboard
// =============================================================================

#[test]
fn arrow_keys_move_one_step() {
    let mut control = control(KnobOptions {
        step: 2.0,
        ..Default::default()
    });

    control.handle_key(Key::ArrowUp);
    control.handle_key(Key::ArrowUp);
    assert_eq!(control.state().value, 4.0);

    control.handle_key(Key::ArrowDown);
    assert_eq!(control.state().value, 2.0);
    assert_eq!(control.view().input_text, "2");
}

#[test]
fn key_codes_map_to_keys() {
    assert_eq!(Key::from_key_code(38), Key::ArrowUp);
    assert_eq!(Key::from_key_code(40), Key::ArrowDown);
    assert_eq!(Key::from_key_code(13), Key::Enter);
    assert_eq!(Key::from_key_code(65), Key::Other);
}

#[test]
fn enter_commits_typed_value_and_closes_popover() {
    let mut control = control(KnobOptions::default());

    control.handle_double_click();
    assert!(control.is_popover_open());

    control.handle_input("7");
    control.handle_key(Key::Enter);

    assert_eq!(control.state().value, 7.0);
    assert!(!control.is_popover_open());
}

#[test]
fn enter_with_garbage_restores_last_value() {
    let mut control = control(KnobOptions {
        initial: 3.0,
        ..Default::default()
    });

    control.handle_double_click();
    control.handle_input("loud");
    control.handle_key(Key::Enter);

    let view = control.view();
    assert_eq!(view.value, 3.0);
    assert_eq!(view.input_text, "3");
    assert!(!view.popover_open);
}

// =============================================================================
// Popover visibility
// =============================================================================

#[test]
fn double_click_toggles_and_blur_closes() {
    let mut control = control(KnobOptions::default());

    control.handle_double_click();
    assert!(control.is_popover_open());
    control.handle_double_click();
    assert!(!control.is_popover_open());

    control.handle_double_click();
    control.handle_blur();
    assert!(!control.is_popover_open());
}

// =============================================================================
// Wheel
// =============================================================================

#[test]
fn legacy_wheel_turns_the_knob() {
    let mut control = control_with(KnobOptions::default(), WheelSupport::MouseWheel);

    // 40 notches scrolled toward the user: 40 * 120 / 40 = 120 degrees
    for _ in 0..40 {
        let mut raw = RawWheelEvent::mouse_wheel(-120.0, None);
        control.handle_wheel(&mut raw);
        assert!(raw.default_prevented());
    }

    assert_eq!(control.state().angle, -70.0);
    assert_eq!(control.state().value, 4.0);
    assert_eq!(control.view().transform, "rotate(-70deg)");
}

#[test]
fn empty_wheel_event_leaves_value_alone() {
    let mut control = control(KnobOptions {
        initial: 6.0,
        ..Default::default()
    });
    let before = control.state();

    let mut raw = RawWheelEvent::default();
    control.handle_wheel(&mut raw);

    assert_eq!(control.state().value, before.value);
}

// =============================================================================
// Construction and view
// =============================================================================

#[test]
fn view_reflects_options() {
    let control = control(KnobOptions::from_attributes([
        ("data-gnob", ""),
        ("data-gnob-max", "1"),
        ("data-gnob-step", "0.25"),
        ("data-gnob-initial", "0.5"),
        ("data-gnob-size", "small"),
    ]));

    let view = control.view();
    assert_eq!(view.value, 0.5);
    assert_eq!(view.display_value, "0.50");
    assert_eq!(view.classes, vec!["gnob".to_string(), KnobSize::Small.to_string()]);
}

#[test]
fn diameter_sizes_the_face() {
    let control = control(KnobOptions::from_attributes([
        ("data-gnob", ""),
        ("data-gnob-diameter", "64"),
    ]));
    assert_eq!(control.view().face_style, "width: 64px; height: 64px");
}

#[test]
fn invalid_options_are_rejected() {
    let result = KnobControl::new(
        &KnobOptions {
            min: 10.0,
            max: 0.0,
            ..Default::default()
        },
        WheelNormalizer::new(WheelSupport::Wheel),
        create_bus(),
    );
    assert!(matches!(result, Err(KnobError::InvalidConfig(_))));
}
