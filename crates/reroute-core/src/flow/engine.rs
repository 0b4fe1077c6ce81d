//! Onboarding flow state machine.
//!
//! Drives the fixed screen sequence Welcome -> SmartLearningIntro ->
//! Notifications -> Location -> PredictiveLearning -> Main. Commands
//! return the event they produced, `None` when nothing observable
//! happened; the navigation host consumes the proceed signals and owns
//! the actual routing.
//!
//! Permission screens do not advance on their own: the hosting screen
//! feeds the controller's [`RequestOutcome`] into `apply_permission`,
//! which decides between advancing and showing the settings hint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::screen::Screen;
use crate::error::FlowError;
use crate::events::Event;
use crate::permission::{PermissionKind, PermissionStatus, RequestOutcome};
use crate::storage::Config;

/// Headless state for one run of the onboarding sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OnboardingFlow {
    /// Unique identifier for this run.
    id: String,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    current: Screen,
    /// Which permission kind the visible settings hint is about, if any.
    settings_hint: Option<PermissionKind>,
    smart_learning_enabled: bool,
}

impl OnboardingFlow {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            completed_at: None,
            current: Screen::Welcome,
            settings_hint: None,
            smart_learning_enabled: true,
        }
    }

    /// Seed the smart-learning toggle from the persisted preference.
    pub fn from_config(config: &Config) -> Self {
        Self {
            smart_learning_enabled: config.smart_learning_enabled,
            ..Self::new()
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn current(&self) -> Screen {
        self.current
    }

    pub fn is_complete(&self) -> bool {
        self.completed_at.is_some()
    }

    pub fn settings_hint(&self) -> Option<PermissionKind> {
        self.settings_hint
    }

    pub fn smart_learning_enabled(&self) -> bool {
        self.smart_learning_enabled
    }

    pub fn session_id(&self) -> &str {
        &self.id
    }

    /// Total time spent in the flow so far.
    pub fn duration_seconds(&self) -> i64 {
        let end = self.completed_at.unwrap_or_else(Utc::now);
        (end - self.started_at).num_seconds()
    }

    /// Build a full state snapshot event for a polling GUI.
    pub fn snapshot(&self) -> Event {
        Event::FlowSnapshot {
            screen: self.current,
            screen_index: self.current.index(),
            total_screens: Screen::ALL.len(),
            settings_hint: self.settings_hint,
            smart_learning_enabled: self.smart_learning_enabled,
            is_complete: self.is_complete(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Continue past the current screen ("Get Started", "Continue",
    /// "Start Using App"). Permission screens ignore this -- they
    /// proceed through `apply_permission` or `skip` instead.
    pub fn advance(&mut self) -> Option<Event> {
        if self.is_complete() {
            return None;
        }
        match self.current {
            Screen::Welcome | Screen::SmartLearningIntro => self.step_forward(),
            Screen::Notifications | Screen::Location => {
                debug!(screen = %self.current, "advance ignored on permission screen");
                None
            }
            Screen::PredictiveLearning => {
                self.current = Screen::Main;
                self.completed_at = Some(Utc::now());
                Some(Event::FlowCompleted {
                    smart_learning_enabled: self.smart_learning_enabled,
                    at: Utc::now(),
                })
            }
            Screen::Main => None,
        }
    }

    /// Skip the current screen ("Skip for Now"). Skipping bypasses both
    /// the per-app permission status and the global services switch.
    pub fn skip(&mut self) -> Result<Event, FlowError> {
        if self.is_complete() {
            return Err(FlowError::AlreadyComplete);
        }
        let from = self.current;
        let to = match from.next() {
            Some(to) if from.is_skippable() => to,
            _ => return Err(FlowError::CannotSkip(from)),
        };
        self.settings_hint = None;
        self.current = to;
        Ok(Event::ScreenSkipped {
            from_screen: from,
            to_screen: to,
            at: Utc::now(),
        })
    }

    /// Fold a permission request's outcome into screen state.
    ///
    /// Granted advances past the screen. A denial points the user at the
    /// OS settings surface, with one exception: on the notifications
    /// screen a denial fresh from the consent prompt leaves the screen
    /// as-is, and only a pre-existing denial raises the hint.
    pub fn apply_permission(
        &mut self,
        kind: PermissionKind,
        outcome: RequestOutcome,
    ) -> Result<Option<Event>, FlowError> {
        if self.is_complete() {
            return Err(FlowError::AlreadyComplete);
        }
        if self.current.required_permission() != Some(kind) {
            return Err(FlowError::ScreenMismatch {
                screen: self.current,
                kind,
            });
        }
        match outcome.status {
            PermissionStatus::Granted => {
                self.settings_hint = None;
                Ok(self.step_forward())
            }
            PermissionStatus::Denied | PermissionStatus::Restricted => {
                if kind == PermissionKind::Notifications && outcome.prompted {
                    return Ok(None);
                }
                self.settings_hint = Some(kind);
                Ok(Some(Event::SettingsHintShown {
                    kind,
                    at: Utc::now(),
                }))
            }
            // The backend was unreachable; nothing to fold in.
            PermissionStatus::Undetermined => Ok(None),
        }
    }

    /// Record that the capability's global switch is off (the
    /// system-wide location services toggle). Checked before any per-app
    /// status; raises the settings hint without prompting.
    pub fn note_services_disabled(&mut self, kind: PermissionKind) -> Result<Event, FlowError> {
        if self.is_complete() {
            return Err(FlowError::AlreadyComplete);
        }
        if self.current.required_permission() != Some(kind) {
            return Err(FlowError::ScreenMismatch {
                screen: self.current,
                kind,
            });
        }
        self.settings_hint = Some(kind);
        Ok(Event::SettingsHintShown {
            kind,
            at: Utc::now(),
        })
    }

    /// Flip the Smart Learning toggle. Emits only on an actual change.
    pub fn set_smart_learning(&mut self, enabled: bool) -> Option<Event> {
        if self.smart_learning_enabled == enabled {
            return None;
        }
        self.smart_learning_enabled = enabled;
        Some(Event::SmartLearningToggled {
            enabled,
            at: Utc::now(),
        })
    }

    /// The user dismissed the settings-hint alert ("Cancel").
    pub fn dismiss_settings_hint(&mut self) {
        self.settings_hint = None;
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn step_forward(&mut self) -> Option<Event> {
        let from = self.current;
        let to = from.next()?;
        self.current = to;
        Some(Event::ScreenAdvanced {
            from_screen: from,
            to_screen: to,
            at: Utc::now(),
        })
    }
}

impl Default for OnboardingFlow {
    fn default() -> Self {
        Self::new()
    }
}
