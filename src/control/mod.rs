//! Headless knob control
//!
//! Everything a page needs to drive a knob without owning any DOM:
//! - wheel, arrow keys, enter, blur and double-click are forwarded to the engine
//! - popover visibility and the popover text field live here, not in the engine
//! - the engine's angular coordinate is turned into a CSS rotation for rendering

use serde::Serialize;

use crate::bus::SharedKnobBus;
use crate::config::{KnobMode, KnobOptions, KnobSize};
use crate::engine::{Knob, KnobConfig, KnobError, KnobState};
use crate::wheel::{RawWheelEvent, WheelNormalizer};

/// Face rotation (degrees) at the rest position of a linear knob
const LINEAR_REST_DEG: f64 = -190.0;

/// Keys the control reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    Enter,
    Other,
}

impl Key {
    /// Map a DOM `keyCode`
    pub fn from_key_code(code: u32) -> Self {
        match code {
            38 => Key::ArrowUp,
            40 => Key::ArrowDown,
            13 => Key::Enter,
            _ => Key::Other,
        }
    }
}

/// Render snapshot handed to whatever draws the knob
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnobView {
    pub value: f64,
    pub display_value: String,
    pub transform: String,
    pub classes: Vec<String>,
    /// Face dimensions from the configured diameter
    pub face_style: String,
    pub indicator_style: Option<String>,
    pub popover_open: bool,
    pub input_text: String,
}

#[derive(Debug, Default)]
struct Popover {
    open: bool,
    input: String,
}

/// A knob plus the interaction state around it
pub struct KnobControl {
    knob: Knob,
    wheel: WheelNormalizer,
    mode: KnobMode,
    size: KnobSize,
    diameter: f64,
    indicator_color: Option<String>,
    popover: Popover,
}

impl KnobControl {
    pub fn new(
        options: &KnobOptions,
        wheel: WheelNormalizer,
        bus: SharedKnobBus,
    ) -> Result<Self, KnobError> {
        let config = KnobConfig::from_options(options, options.mode.angular_range())?;
        let knob = Knob::new(config, bus);
        let mut control = Self {
            knob,
            wheel,
            mode: options.mode,
            size: options.size,
            diameter: options.diameter,
            indicator_color: options.indicator_color.clone(),
            popover: Popover::default(),
        };
        control.sync_input();
        Ok(control)
    }

    pub fn knob(&self) -> &Knob {
        &self.knob
    }

    pub fn state(&self) -> KnobState {
        self.knob.state()
    }

    pub fn is_popover_open(&self) -> bool {
        self.popover.open
    }

    /// Scroll over the knob face. The page never scrolls underneath it.
    pub fn handle_wheel(&mut self, raw: &mut RawWheelEvent) {
        let mut wheel = self.wheel.normalize(raw);
        let delta = wheel.rotation_delta();
        wheel.prevent_default();

        if self.knob.rotate_by(delta).is_ok() {
            self.sync_input();
        }
    }

    pub fn handle_key(&mut self, key: Key) {
        let result = match key {
            Key::ArrowUp => self.knob.step_by(1),
            Key::ArrowDown => self.knob.step_by(-1),
            Key::Enter => {
                let result = self.knob.set_value_text(&self.popover.input);
                self.popover.open = false;
                result
            }
            Key::Other => return,
        };

        // On enter, rejected text is replaced by the last accepted value
        if result.is_ok() || key == Key::Enter {
            self.sync_input();
        }
    }

    /// Typing into the popover field; committed on enter
    pub fn handle_input(&mut self, text: &str) {
        self.popover.input = text.to_string();
    }

    pub fn handle_double_click(&mut self) {
        self.popover.open = !self.popover.open;
    }

    pub fn handle_blur(&mut self) {
        self.popover.open = false;
    }

    /// Rotation of the face in degrees
    pub fn rotation_degrees(&self) -> f64 {
        let angle = self.knob.angle();
        match self.mode {
            KnobMode::Rotary => angle,
            KnobMode::Linear => LINEAR_REST_DEG + (angle - self.knob.config().range.rest()),
        }
    }

    pub fn view(&self) -> KnobView {
        KnobView {
            value: self.knob.value(),
            display_value: self.display_value(),
            transform: format!("rotate({}deg)", self.rotation_degrees()),
            classes: vec!["gnob".to_string(), self.size.to_string()],
            face_style: format!("width: {d}px; height: {d}px", d = self.diameter),
            indicator_style: self
                .indicator_color
                .as_ref()
                .map(|color| format!("background: {color}; box-shadow: 0px 0px 8px {color}")),
            popover_open: self.popover.open,
            input_text: self.popover.input.clone(),
        }
    }

    fn display_value(&self) -> String {
        let precision = self.knob.config().precision as usize;
        format!("{:.*}", precision, self.knob.value())
    }

    fn sync_input(&mut self) {
        self.popover.input = self.display_value();
    }
}
