//! Drag geometry for the bottom sheet.
//!
//! Each raw measurement from the host layout yields three bounded
//! signals: the clamped sheet height, the floating toolbar's opacity,
//! and the spring duration for the next animation. The derivation is a
//! pure function; the only history is the previous raw height, so the
//! toolbar fade stays keyed to a fixed geometric threshold instead of a
//! percentage of screen height and behaves the same on every device.

use serde::{Deserialize, Serialize};

use super::detent::MEDIUM_DETENT_HEIGHT;

/// Width of the linear fade band above the medium detent, in points.
/// The toolbar is fully opaque at the detent and fully transparent one
/// band above it.
pub const TOOLBAR_FADE_BAND: f64 = 50.0;
/// Divisor converting a raw height delta into seconds. Abrupt
/// programmatic snaps produce large deltas and hit the duration cap;
/// slow user drags animate near-instantly.
pub const DRAG_SPEED_DIVISOR: f64 = 100.0;
/// Cap on the derived spring duration, in seconds.
pub const MAX_ANIMATION_SECS: f64 = 0.3;

/// One raw measurement of the sheet, as reported by the host layout on
/// every drag or resize sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetMeasurement {
    pub raw_height: f64,
    /// Bottom safe-area inset of the hosting window.
    pub bottom_inset: f64,
}

/// Animation parameters derived from one measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SheetDerived {
    /// Sheet height limited to `[0, 350 + bottom_inset]`; the floating
    /// toolbar rides on top of this offset.
    pub clamped_height: f64,
    /// 1.0 at or below the medium detent, fading linearly to 0.0 across
    /// the band above it.
    pub toolbar_opacity: f64,
    /// Spring duration in seconds, `[0, 0.3]`.
    pub animation_secs: f64,
}

impl SheetDerived {
    /// Derive animation parameters from a measurement and the previous
    /// raw height (`None` on the first sample).
    ///
    /// Never fails: negative or non-finite inputs are sanitized and
    /// clamped.
    pub fn from_measurement(m: SheetMeasurement, previous_raw: Option<f64>) -> Self {
        let raw = sanitize(m.raw_height);
        let inset = sanitize(m.bottom_inset).max(0.0);
        let ceiling = MEDIUM_DETENT_HEIGHT + inset;

        let clamped_height = raw.clamp(0.0, ceiling);

        let progress = ((raw - ceiling) / TOOLBAR_FADE_BAND).clamp(0.0, 1.0);
        let toolbar_opacity = 1.0 - progress;

        let delta = match previous_raw {
            Some(previous) => (raw - sanitize(previous)).abs(),
            None => 0.0,
        };
        let animation_secs = (delta / DRAG_SPEED_DIVISOR).clamp(0.0, MAX_ANIMATION_SECS);

        Self {
            clamped_height,
            toolbar_opacity,
            animation_secs,
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Stateful wrapper remembering the previous raw height between samples.
///
/// Owned exclusively by the hosting screen; feed it every measurement in
/// arrival order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SheetGeometry {
    previous_raw: Option<f64>,
}

impl SheetGeometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one measurement, updating the remembered raw height.
    pub fn observe(&mut self, m: SheetMeasurement) -> SheetDerived {
        let derived = SheetDerived::from_measurement(m, self.previous_raw);
        self.previous_raw = Some(sanitize(m.raw_height));
        derived
    }

    /// Forget the previous sample, e.g. when the sheet is re-presented.
    pub fn reset(&mut self) {
        self.previous_raw = None;
    }
}
