//! Onboarding flow state.
//!
//! The fixed screen sequence from the welcome page to the main map,
//! exposed as a headless state machine. The flow emits proceed signals
//! as events; the navigation host owns the actual routing.

mod engine;
mod screen;

pub use engine::OnboardingFlow;
pub use screen::{notification_status_label, smart_learning_label, Screen};
