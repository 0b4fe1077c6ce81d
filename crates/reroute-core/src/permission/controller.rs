//! Permission tracking for a single onboarding screen.
//!
//! One controller exists per permission kind per screen. The controller
//! never invents status transitions: `Undetermined` moves to `Granted`
//! or `Denied` only through `request()`, and every other transition
//! arrives out-of-band from the OS settings app and is picked up by
//! `refresh()` when the screen becomes active again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, warn};

use super::provider::PermissionProvider;
use super::status::{PermissionKind, PermissionState, PermissionStatus};
use crate::events::Event;

/// Revocable handle tying an in-flight permission request to the hosting
/// screen's lifetime. The screen revokes it on teardown; a request that
/// resolves afterwards is dropped without touching state.
#[derive(Debug, Clone)]
pub struct ScreenLiveness {
    live: Arc<AtomicBool>,
}

impl ScreenLiveness {
    fn new() -> Self {
        Self {
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn revoke(&self) {
        self.live.store(false, Ordering::SeqCst);
    }

    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

/// What a [`PermissionController::request`] call resolved to, and whether
/// the OS consent dialog was actually presented to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestOutcome {
    pub status: PermissionStatus,
    pub prompted: bool,
}

/// Tracks OS-level authorization for one permission kind.
pub struct PermissionController {
    kind: PermissionKind,
    provider: Arc<dyn PermissionProvider>,
    /// Last status this controller observed; refreshed on query, never
    /// trusted indefinitely.
    known_status: PermissionStatus,
    liveness: ScreenLiveness,
}

impl PermissionController {
    /// Create a controller seeded with the OS-reported status at
    /// construction time.
    pub fn new(kind: PermissionKind, provider: Arc<dyn PermissionProvider>) -> Self {
        let known_status = match provider.status(kind) {
            Ok(status) => status,
            Err(err) => {
                warn!(kind = %kind, "permission backend unreachable: {err}");
                PermissionStatus::Undetermined
            }
        };
        Self {
            kind,
            provider,
            known_status,
            liveness: ScreenLiveness::new(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn kind(&self) -> PermissionKind {
        self.kind
    }

    /// Last observed status, without touching the OS.
    pub fn known_status(&self) -> PermissionStatus {
        self.known_status
    }

    /// Live OS query. Never fails the caller: an unreachable backend
    /// reads as `Undetermined`.
    pub fn status(&self) -> PermissionStatus {
        match self.provider.status(self.kind) {
            Ok(status) => status,
            Err(err) => {
                warn!(kind = %self.kind, "permission backend unreachable: {err}");
                PermissionStatus::Undetermined
            }
        }
    }

    /// Whether the capability's global switch is on (always true on
    /// platforms without one).
    pub fn services_enabled(&self) -> bool {
        self.provider.services_enabled(self.kind)
    }

    pub fn state(&self) -> PermissionState {
        PermissionState {
            kind: self.kind,
            status: self.known_status,
        }
    }

    /// Handle for the hosting screen to revoke on teardown.
    pub fn liveness(&self) -> ScreenLiveness {
        self.liveness.clone()
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Re-query the OS on screen (re)activation. Detects out-of-band
    /// changes the user made in the settings app while this screen was
    /// not frontmost.
    pub fn refresh(&mut self) -> Option<Event> {
        let fresh = self.status();
        if fresh == self.known_status {
            return None;
        }
        let from = self.known_status;
        self.known_status = fresh;
        Some(Event::PermissionChanged {
            kind: self.kind,
            from,
            to: fresh,
            at: Utc::now(),
        })
    }

    /// Request authorization, suspending until the user answers or the
    /// OS short-circuits on a prior decision.
    ///
    /// Already granted: returns immediately, no prompt (idempotent).
    /// Denied or restricted: returns immediately, the OS will not
    /// re-prompt; the caller offers an open-settings affordance instead.
    ///
    /// Returns `None` when the hosting screen was torn down before the
    /// result arrived; the late result is dropped without mutating state.
    pub async fn request(&mut self) -> Option<RequestOutcome> {
        if !self.liveness.is_live() {
            return None;
        }
        let current = self.status();
        if !current.allows_prompt() {
            self.known_status = current;
            return Some(RequestOutcome {
                status: current,
                prompted: false,
            });
        }

        match self.provider.request_authorization(self.kind).await {
            Ok(status) => {
                if !self.liveness.is_live() {
                    debug!(kind = %self.kind, "dropping authorization result for torn-down screen");
                    return None;
                }
                self.known_status = status;
                Some(RequestOutcome {
                    status,
                    prompted: true,
                })
            }
            Err(err) => {
                warn!(kind = %self.kind, "authorization request failed: {err}");
                if !self.liveness.is_live() {
                    return None;
                }
                Some(RequestOutcome {
                    status: PermissionStatus::Undetermined,
                    prompted: false,
                })
            }
        }
    }

    /// Open the OS settings surface for this app. Best-effort: a missing
    /// URL or a failed launch is ignored.
    pub fn open_settings(&self) -> Option<Event> {
        let url = match self.provider.settings_url() {
            Some(url) => url,
            None => {
                debug!(kind = %self.kind, "no settings url available");
                return None;
            }
        };
        if let Err(err) = open::that(url.as_str()) {
            debug!(kind = %self.kind, "failed to open settings: {err}");
            return None;
        }
        Some(Event::SettingsOpened { at: Utc::now() })
    }
}
