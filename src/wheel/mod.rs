//! Scroll-wheel normalization
//!
//! Hosts deliver wheel input in one of three shapes:
//! - standards `wheel` events with `deltaX`/`deltaY`/`deltaMode`
//! - legacy `mousewheel` events with a signed `wheelDelta` (120 per notch)
//! - legacy `DOMMouseScroll` / `MozMousePixelScroll` events with a `detail` count
//!
//! The host is probed once for which event it supports. The resulting
//! [`WheelSupport`] is handed to a [`WheelNormalizer`], which turns every raw
//! event into the same [`NormalizedWheel`] shape.

use serde::{Deserialize, Serialize};

/// Divisor applied to legacy `wheelDelta` values (one notch = 120 = 3 lines)
pub const WHEEL_DELTA_DIVISOR: f64 = 40.0;

/// What the host can tell us about its event model
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostCapabilities {
    /// Elements expose an `onwheel` handler slot
    pub has_onwheel: bool,
    /// The document exposes an `onmousewheel` handler slot
    pub has_onmousewheel: bool,
}

/// Which wheel event family the host speaks.
///
/// Decided once at startup; never consulted through global state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelSupport {
    /// Standards `wheel` event
    Wheel,
    /// WebKit / IE `mousewheel`
    MouseWheel,
    /// Older Firefox `DOMMouseScroll` (+ `MozMousePixelScroll`)
    DomMouseScroll,
}

impl WheelSupport {
    /// Pick the best event family the host supports.
    pub fn probe(caps: &HostCapabilities) -> Self {
        if caps.has_onwheel {
            WheelSupport::Wheel
        } else if caps.has_onmousewheel {
            WheelSupport::MouseWheel
        } else {
            // Remaining hosts are assumed to be older Firefox
            WheelSupport::DomMouseScroll
        }
    }

    /// Host event names a shell must bind for this strategy
    pub fn event_names(&self) -> &'static [&'static str] {
        match self {
            WheelSupport::Wheel => &["wheel"],
            WheelSupport::MouseWheel => &["mousewheel"],
            WheelSupport::DomMouseScroll => &["DOMMouseScroll", "MozMousePixelScroll"],
        }
    }
}

/// Granularity of a normalized delta.
///
/// Informational only: the engine treats both as plain scalar deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum DeltaMode {
    Pixel = 0,
    Line = 1,
}

impl DeltaMode {
    fn from_raw(mode: Option<u32>) -> Self {
        match mode {
            Some(1) => DeltaMode::Line,
            _ => DeltaMode::Pixel,
        }
    }
}

/// A wheel event exactly as the host delivered it.
///
/// Every field except the type name is optional because each event family
/// exposes a different subset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWheelEvent {
    pub event_type: String,
    pub delta_x: Option<f64>,
    pub delta_y: Option<f64>,
    pub delta_mode: Option<u32>,
    pub wheel_delta: Option<f64>,
    pub wheel_delta_x: Option<f64>,
    pub detail: Option<f64>,
    #[serde(skip)]
    default_prevented: bool,
}

impl RawWheelEvent {
    /// Standards `wheel` event
    pub fn wheel(delta_x: f64, delta_y: f64, delta_mode: u32) -> Self {
        Self {
            event_type: "wheel".to_string(),
            delta_x: Some(delta_x),
            delta_y: Some(delta_y),
            delta_mode: Some(delta_mode),
            ..Default::default()
        }
    }

    /// Legacy `mousewheel` event
    pub fn mouse_wheel(wheel_delta: f64, wheel_delta_x: Option<f64>) -> Self {
        Self {
            event_type: "mousewheel".to_string(),
            wheel_delta: Some(wheel_delta),
            wheel_delta_x,
            ..Default::default()
        }
    }

    /// Legacy Firefox event; `pixel` selects `MozMousePixelScroll`
    pub fn dom_mouse_scroll(detail: f64, pixel: bool) -> Self {
        let event_type = if pixel {
            "MozMousePixelScroll"
        } else {
            "DOMMouseScroll"
        };
        Self {
            event_type: event_type.to_string(),
            detail: Some(detail),
            ..Default::default()
        }
    }

    /// Ask the host not to scroll the page for this event
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// The single wheel shape the rest of the crate works with
#[derive(Debug)]
pub struct NormalizedWheel<'a> {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_mode: DeltaMode,
    origin: &'a mut RawWheelEvent,
}

impl NormalizedWheel<'_> {
    /// Forward to the originating event
    pub fn prevent_default(&mut self) {
        self.origin.prevent_default();
    }

    /// Rotation to apply: vertical scroll wins, horizontal is mirrored
    pub fn rotation_delta(&self) -> f64 {
        if self.delta_y != 0.0 {
            self.delta_y
        } else {
            -self.delta_x
        }
    }
}

/// Stateless translator from raw host events to [`NormalizedWheel`]
#[derive(Debug, Clone, Copy)]
pub struct WheelNormalizer {
    support: WheelSupport,
}

impl WheelNormalizer {
    pub fn new(support: WheelSupport) -> Self {
        Self { support }
    }

    pub fn support(&self) -> WheelSupport {
        self.support
    }

    pub fn normalize<'a>(&self, raw: &'a mut RawWheelEvent) -> NormalizedWheel<'a> {
        let (delta_x, delta_y, delta_mode) = match self.support {
            WheelSupport::Wheel => (
                finite_or_zero(raw.delta_x),
                finite_or_zero(raw.delta_y),
                DeltaMode::from_raw(raw.delta_mode),
            ),
            WheelSupport::MouseWheel => {
                let delta_y = -finite_or_zero(raw.wheel_delta) / WHEEL_DELTA_DIVISOR;
                // WebKit also reports a horizontal component
                let delta_x = -finite_or_zero(raw.wheel_delta_x) / WHEEL_DELTA_DIVISOR;
                (delta_x, delta_y, legacy_mode(&raw.event_type))
            }
            WheelSupport::DomMouseScroll => (
                0.0,
                finite_or_zero(raw.detail),
                legacy_mode(&raw.event_type),
            ),
        };

        NormalizedWheel {
            // -0.0 from negating a missing delta reads badly in logs
            delta_x: delta_x + 0.0,
            delta_y: delta_y + 0.0,
            delta_mode,
            origin: raw,
        }
    }
}

fn legacy_mode(event_type: &str) -> DeltaMode {
    if event_type == "MozMousePixelScroll" {
        DeltaMode::Pixel
    } else {
        DeltaMode::Line
    }
}

fn finite_or_zero(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}
