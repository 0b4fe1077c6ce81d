//! Bottom-sheet geometry for the map screen.
//!
//! Converts continuous drag measurements into bounded animation
//! parameters and models the sheet's discrete detents. Pure math; no
//! data flows between this module and the permission machinery.

mod detent;
mod geometry;

pub use detent::{SheetDetent, MEDIUM_DETENT_HEIGHT, PEEK_DETENT_HEIGHT};
pub use geometry::{
    SheetDerived, SheetGeometry, SheetMeasurement, DRAG_SPEED_DIVISOR, MAX_ANIMATION_SECS,
    TOOLBAR_FADE_BAND,
};
