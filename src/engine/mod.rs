//! Knob value engine
//!
//! Sole authority over a knob's numeric value and its angular position.
//! [`KnobEngine`] holds the immutable config and tick table and exposes pure
//! transitions (`with_value`, `rotated`) from one [`KnobState`] to the next.
//! [`Knob`] owns the current state and publishes every accepted change on
//! the [`KnobBus`](crate::bus::KnobBus).

pub mod range;
pub mod ticks;

use serde::Serialize;
use thiserror::Error;

use crate::bus::{KnobEvent, SharedKnobBus};
use crate::config::KnobOptions;

pub use range::AngularRange;
pub use ticks::{precision_of, round_to, TickTable};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum KnobError {
    /// Candidate is not a number; state is left untouched
    #[error("invalid knob value: {0}")]
    InvalidValue(String),

    #[error("invalid knob config: {0}")]
    InvalidConfig(String),
}

/// Immutable numeric bounds of a knob
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnobConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub initial: f64,
    /// Decimal digits retained in the stored value, derived from `step`
    pub precision: u32,
    pub range: AngularRange,
}

impl KnobConfig {
    pub fn new(
        min: f64,
        max: f64,
        step: f64,
        initial: f64,
        range: AngularRange,
    ) -> Result<Self, KnobError> {
        if !min.is_finite() || !max.is_finite() || !step.is_finite() {
            return Err(KnobError::InvalidConfig(format!(
                "bounds must be finite (min={min}, max={max}, step={step})"
            )));
        }
        if min > max {
            return Err(KnobError::InvalidConfig(format!(
                "min {min} is greater than max {max}"
            )));
        }
        if !(max - min).is_finite() {
            return Err(KnobError::InvalidConfig(format!(
                "range [{min}, {max}] is too wide"
            )));
        }
        if step <= 0.0 {
            return Err(KnobError::InvalidConfig(format!(
                "step must be positive, got {step}"
            )));
        }

        Ok(Self {
            min,
            max,
            step,
            // A non-numeric initial value falls back to the rest position
            initial: if initial.is_nan() { min } else { initial },
            precision: precision_of(step),
            range,
        })
    }

    pub fn from_options(options: &KnobOptions, range: AngularRange) -> Result<Self, KnobError> {
        Self::new(options.min, options.max, options.step, options.initial, range)
    }
}

/// Current value and the angle it is drawn at
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KnobState {
    pub value: f64,
    pub angle: f64,
}

/// Pure value/angle mapping for one config
#[derive(Debug, Clone)]
pub struct KnobEngine {
    config: KnobConfig,
    ticks: TickTable,
}

impl KnobEngine {
    pub fn new(config: KnobConfig) -> Self {
        let ticks = TickTable::build(
            config.min,
            config.max,
            config.step,
            config.precision,
            &config.range,
        );
        Self { config, ticks }
    }

    pub fn config(&self) -> &KnobConfig {
        &self.config
    }

    pub fn ticks(&self) -> &TickTable {
        &self.ticks
    }

    /// Starting state: the initial value, drawn at its tick angle
    pub fn initialize(&self) -> KnobState {
        let value = self.quantize(self.config.initial);
        KnobState {
            value,
            angle: self.angle_for(value),
        }
    }

    /// State after typing or stepping to `candidate`.
    ///
    /// Out-of-range candidates are clamped; NaN is rejected.
    pub fn with_value(&self, candidate: f64) -> Result<KnobState, KnobError> {
        if candidate.is_nan() {
            return Err(KnobError::InvalidValue(candidate.to_string()));
        }
        let value = self.quantize(candidate);
        Ok(KnobState {
            value,
            angle: self.angle_for(value),
        })
    }

    /// State after turning by `delta` angle units. The angle is kept as
    /// turned; only the value is resolved from it.
    pub fn rotated(&self, current: KnobState, delta: f64) -> Result<KnobState, KnobError> {
        if !delta.is_finite() {
            return Err(KnobError::InvalidValue(format!("rotation delta {delta}")));
        }
        let angle = self.config.range.clamp(current.angle + delta);
        Ok(KnobState {
            value: self.value_at(angle),
            angle,
        })
    }

    /// Resolve an angle to a value. The bounds snap straight to min/max so
    /// table rounding never leaves the extremes unreachable.
    pub fn value_at(&self, angle: f64) -> f64 {
        let range = &self.config.range;
        if angle <= range.rest() {
            return self.config.min;
        }
        if angle >= range.max() {
            return self.config.max;
        }
        let unit = range.offset(angle).floor() as usize;
        self.ticks.get(unit).unwrap_or(self.config.max)
    }

    /// Inverse lookup: where a value is drawn
    pub fn angle_for(&self, value: f64) -> f64 {
        let range = &self.config.range;
        if value >= self.config.max && self.config.max > self.config.min {
            return range.max();
        }
        if value <= self.config.min {
            return range.rest();
        }
        range.rest() + self.ticks.unit_for(value) as f64
    }

    /// Clamp, then round to precision. A bound that is off the precision
    /// grid is stored exactly rather than rounded out of range.
    fn quantize(&self, candidate: f64) -> f64 {
        let (min, max) = (self.config.min, self.config.max);
        let clamped = candidate.max(min).min(max);
        round_to(clamped, self.config.precision).max(min).min(max)
    }
}

/// A live knob: engine plus current state plus change notification
pub struct Knob {
    engine: KnobEngine,
    state: KnobState,
    bus: SharedKnobBus,
}

impl Knob {
    /// Build the knob and announce its initial value
    pub fn new(config: KnobConfig, bus: SharedKnobBus) -> Self {
        let engine = KnobEngine::new(config);
        let state = engine.initialize();
        let knob = Self { engine, state, bus };
        knob.notify();
        knob
    }

    pub fn engine(&self) -> &KnobEngine {
        &self.engine
    }

    pub fn config(&self) -> &KnobConfig {
        self.engine.config()
    }

    pub fn ticks(&self) -> &TickTable {
        self.engine.ticks()
    }

    pub fn state(&self) -> KnobState {
        self.state
    }

    pub fn value(&self) -> f64 {
        self.state.value
    }

    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn bus(&self) -> &SharedKnobBus {
        &self.bus
    }

    /// Set the value directly. Returns the stored (clamped, rounded) value.
    pub fn set_value(&mut self, candidate: f64) -> Result<f64, KnobError> {
        let next = self
            .engine
            .with_value(candidate)
            .inspect_err(|e| tracing::debug!("Ignoring knob input: {}", e))?;
        self.commit(next);
        Ok(next.value)
    }

    /// Set the value from free text (the popover input)
    pub fn set_value_text(&mut self, text: &str) -> Result<f64, KnobError> {
        match text.trim().parse::<f64>() {
            Ok(candidate) => self.set_value(candidate),
            Err(_) => {
                tracing::debug!("Ignoring non-numeric knob input: {:?}", text);
                Err(KnobError::InvalidValue(text.to_string()))
            }
        }
    }

    /// Turn the knob by `delta` angle units
    pub fn rotate_by(&mut self, delta: f64) -> Result<f64, KnobError> {
        let next = self
            .engine
            .rotated(self.state, delta)
            .inspect_err(|e| tracing::debug!("Ignoring knob rotation: {}", e))?;
        self.commit(next);
        Ok(next.value)
    }

    /// Move by whole steps (arrow keys use ±1)
    pub fn step_by(&mut self, steps: i32) -> Result<f64, KnobError> {
        let candidate = self.state.value + f64::from(steps) * self.engine.config().step;
        self.set_value(candidate)
    }

    fn commit(&mut self, next: KnobState) {
        self.state = next;
        self.notify();
    }

    fn notify(&self) {
        self.bus.publish(KnobEvent::ValueChanged {
            value: self.state.value,
            angle: self.state.angle,
        });
    }
}
