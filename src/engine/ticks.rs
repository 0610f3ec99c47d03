//! Precomputed angle-unit → value table.

use serde::Serialize;

use super::range::AngularRange;

/// Beyond this many digits `10^precision` stops being exact in an f64
const MAX_PRECISION: u32 = 15;

/// Slack for `units / units_per_step` landing a hair under a whole step
const STEP_EPSILON: f64 = 1e-9;

/// Number of decimal digits in `step` (0 for whole steps).
pub fn precision_of(step: f64) -> u32 {
    let text = step.to_string();
    match text.split_once('.') {
        Some((_, fraction)) => (fraction.len() as u32).min(MAX_PRECISION),
        None => 0,
    }
}

/// Round half away from zero to `precision` decimal digits
pub fn round_to(value: f64, precision: u32) -> f64 {
    if !value.is_finite() || precision >= MAX_PRECISION {
        return value;
    }
    let factor = 10f64.powi(precision as i32);
    let scaled = value * factor;
    // Magnitudes this large carry no fractional digits to round away
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Value reachable at each whole unit of travel from the rest bound.
///
/// Entry `i` is `min + floor(i / units_per_step) * step`, so the table is a
/// staircase: one flat band per step, never decreasing, capped at `max`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickTable {
    values: Vec<f64>,
}

impl TickTable {
    pub fn build(min: f64, max: f64, step: f64, precision: u32, range: &AngularRange) -> Self {
        let span = range.span();
        let len = span.floor() as usize;

        if max <= min {
            return Self {
                values: vec![min; len],
            };
        }

        let units_per_step = span * step / (max - min);
        let values = (0..len)
            .map(|unit| {
                let steps = (unit as f64 / units_per_step + STEP_EPSILON).floor();
                round_to((min + steps * step).min(max), precision)
            })
            .collect();

        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, unit: usize) -> Option<f64> {
        self.values.get(unit).copied()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First unit of the band holding the largest tick value `<= value`.
    ///
    /// Values below the first tick map to unit 0.
    pub fn unit_for(&self, value: f64) -> usize {
        let below = self.values.partition_point(|&tick| tick <= value);
        if below == 0 {
            return 0;
        }
        let band = self.values[below - 1];
        self.values.partition_point(|&tick| tick < band)
    }
}
