use serde::{Deserialize, Serialize};

/// Height of the collapsed search-bar strip, in points.
pub const PEEK_DETENT_HEIGHT: f64 = 80.0;
/// Height of the half-open sheet, in points. Also the threshold where
/// the floating toolbar starts fading out.
pub const MEDIUM_DETENT_HEIGHT: f64 = 350.0;

/// Discrete allowed heights for the draggable bottom sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetDetent {
    Peek,
    Medium,
    Full,
}

impl SheetDetent {
    /// Fixed height in points; `None` for the full-screen detent, whose
    /// height the host layout decides.
    pub fn fixed_height(self) -> Option<f64> {
        match self {
            SheetDetent::Peek => Some(PEEK_DETENT_HEIGHT),
            SheetDetent::Medium => Some(MEDIUM_DETENT_HEIGHT),
            SheetDetent::Full => None,
        }
    }

    /// The sheet snaps to `Full` while the search field is focused and
    /// back to `Medium` when focus is lost.
    pub fn for_search_focus(focused: bool) -> Self {
        if focused {
            SheetDetent::Full
        } else {
            SheetDetent::Medium
        }
    }
}

impl Default for SheetDetent {
    /// The sheet is presented collapsed.
    fn default() -> Self {
        SheetDetent::Peek
    }
}
