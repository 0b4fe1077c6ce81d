//! # Reroute Core Library
//!
//! This library provides the onboarding-flow logic for Reroute, a
//! trip-disruption alert app. It follows a headless-core philosophy:
//! every screen decision lives in this crate, and the mobile shell is a
//! thin presentation layer that renders state and forwards user input.
//!
//! ## Architecture
//!
//! - **Permission**: a four-state status machine per permission kind,
//!   driven through a single platform provider trait, with a liveness
//!   guard that drops OS callbacks for torn-down screens
//! - **Sheet**: pure drag geometry for the map screen's bottom sheet
//!   (clamped height, toolbar fade, spring duration)
//! - **Flow**: the fixed screen sequence from Welcome to the main map,
//!   emitting proceed signals as events
//! - **Storage**: TOML-based preference store holding the single
//!   smart-learning flag
//!
//! ## Key Components
//!
//! - [`PermissionController`]: status tracking and consent requests
//! - [`SheetGeometry`]: measurement-to-animation derivation
//! - [`OnboardingFlow`]: screen progression state machine
//! - [`Config`]: persisted preference management

pub mod permission;
pub mod sheet;
pub mod flow;
pub mod storage;
pub mod events;
pub mod error;

pub use permission::{
    PermissionController, PermissionKind, PermissionProvider, PermissionState, PermissionStatus,
    RequestOutcome, ScreenLiveness,
};
pub use sheet::{
    SheetDerived, SheetDetent, SheetGeometry, SheetMeasurement, DRAG_SPEED_DIVISOR,
    MAX_ANIMATION_SECS, MEDIUM_DETENT_HEIGHT, PEEK_DETENT_HEIGHT, TOOLBAR_FADE_BAND,
};
pub use flow::{notification_status_label, smart_learning_label, OnboardingFlow, Screen};
pub use storage::Config;
pub use events::Event;
pub use error::{ConfigError, CoreError, FlowError, ProviderError};
