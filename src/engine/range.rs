//! Angular coordinate range shared by every knob presentation.

use serde::{Deserialize, Serialize};

use super::KnobError;

/// Widest custom range accepted; the tick table holds one entry per unit
pub const MAX_SPAN: f64 = 3600.0;

/// Span between the rest ("off") bound and the maximum bound of a knob.
///
/// The unit is whatever the presentation chooses: degrees for a rotating
/// face, position units for a linear strip. The engine only cares that one
/// tick table entry covers one whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngularRange {
    rest: f64,
    max: f64,
}

impl AngularRange {
    /// Rotating face: -190° at rest, 100° at max (290° of travel)
    pub const DEGREES: AngularRange = AngularRange {
        rest: -190.0,
        max: 100.0,
    };

    /// Linear strip: position 0 at rest, 295 at max
    pub const LINEAR: AngularRange = AngularRange {
        rest: 0.0,
        max: 295.0,
    };

    /// Build a custom range. Needs at least one whole unit of travel and at
    /// most [`MAX_SPAN`] units.
    pub fn new(rest: f64, max: f64) -> Result<Self, KnobError> {
        if !rest.is_finite() || !max.is_finite() {
            return Err(KnobError::InvalidConfig(format!(
                "angular bounds must be finite (rest={rest}, max={max})"
            )));
        }
        if max - rest < 1.0 {
            return Err(KnobError::InvalidConfig(format!(
                "angular range [{rest}, {max}] spans less than one unit"
            )));
        }
        if max - rest > MAX_SPAN {
            return Err(KnobError::InvalidConfig(format!(
                "angular range [{rest}, {max}] spans more than {MAX_SPAN} units"
            )));
        }
        Ok(Self { rest, max })
    }

    pub fn rest(&self) -> f64 {
        self.rest
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn span(&self) -> f64 {
        self.max - self.rest
    }

    pub fn clamp(&self, angle: f64) -> f64 {
        angle.max(self.rest).min(self.max)
    }

    /// Distance travelled from the rest bound
    pub fn offset(&self, angle: f64) -> f64 {
        (angle - self.rest).abs()
    }
}

impl Default for AngularRange {
    fn default() -> Self {
        Self::DEGREES
    }
}
