//! Permission status machines for the onboarding screens.
//!
//! Two permission kinds (notifications, location) share one four-way
//! status shape and one provider seam; a controller instance tracks one
//! kind for one screen.

mod controller;
mod provider;
mod status;

pub use controller::{PermissionController, RequestOutcome, ScreenLiveness};
pub use provider::PermissionProvider;
pub use status::{PermissionKind, PermissionState, PermissionStatus};
