//! Integration tests for the onboarding flow: permission controllers,
//! flow progression, and the persisted preference working together.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use reroute_core::{
    notification_status_label, Config, ConfigError, CoreError, Event, FlowError, OnboardingFlow,
    PermissionController, PermissionKind, PermissionProvider, PermissionStatus, ProviderError,
    Screen, ScreenLiveness,
};
use tempfile::TempDir;

/// Simulated OS permission surface with independently scripted kinds.
struct ScriptedOs {
    statuses: Mutex<HashMap<PermissionKind, PermissionStatus>>,
    answers: Mutex<HashMap<PermissionKind, PermissionStatus>>,
    prompts: AtomicUsize,
    location_services: AtomicBool,
    /// When set, the next prompt revokes this handle before resolving,
    /// simulating the user leaving the screen mid-dialog.
    pending_revoke: Mutex<Option<ScreenLiveness>>,
}

impl ScriptedOs {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            statuses: Mutex::new(HashMap::from([
                (PermissionKind::Notifications, PermissionStatus::Undetermined),
                (PermissionKind::Location, PermissionStatus::Undetermined),
            ])),
            answers: Mutex::new(HashMap::from([
                (PermissionKind::Notifications, PermissionStatus::Granted),
                (PermissionKind::Location, PermissionStatus::Granted),
            ])),
            prompts: AtomicUsize::new(0),
            location_services: AtomicBool::new(true),
            pending_revoke: Mutex::new(None),
        })
    }

    fn set_status(&self, kind: PermissionKind, status: PermissionStatus) {
        self.statuses.lock().unwrap().insert(kind, status);
    }

    fn disable_location_services(&self) {
        self.location_services.store(false, Ordering::SeqCst);
    }

    fn revoke_when_prompted(&self, handle: ScreenLiveness) {
        *self.pending_revoke.lock().unwrap() = Some(handle);
    }

    fn prompt_count(&self) -> usize {
        self.prompts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PermissionProvider for ScriptedOs {
    fn status(&self, kind: PermissionKind) -> Result<PermissionStatus, ProviderError> {
        Ok(*self
            .statuses
            .lock()
            .unwrap()
            .get(&kind)
            .unwrap_or(&PermissionStatus::Undetermined))
    }

    async fn request_authorization(
        &self,
        kind: PermissionKind,
    ) -> Result<PermissionStatus, ProviderError> {
        self.prompts.fetch_add(1, Ordering::SeqCst);
        if let Some(handle) = self.pending_revoke.lock().unwrap().take() {
            handle.revoke();
        }
        let answer = *self
            .answers
            .lock()
            .unwrap()
            .get(&kind)
            .unwrap_or(&PermissionStatus::Denied);
        self.statuses.lock().unwrap().insert(kind, answer);
        Ok(answer)
    }

    fn services_enabled(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::Location => self.location_services.load(Ordering::SeqCst),
            _ => true,
        }
    }
}

/// Walk a fresh flow past the two intro screens.
fn flow_at_notifications() -> OnboardingFlow {
    let mut flow = OnboardingFlow::new();
    flow.advance();
    flow.advance();
    assert_eq!(flow.current(), Screen::Notifications);
    flow
}

#[tokio::test]
async fn full_grant_path_reaches_the_main_screen() {
    let os = ScriptedOs::new();
    let mut flow = OnboardingFlow::new();
    let mut events: Vec<Event> = Vec::new();

    events.push(flow.advance().unwrap());
    events.push(flow.advance().unwrap());

    let mut notifications =
        PermissionController::new(PermissionKind::Notifications, os.clone());
    let outcome = notifications.request().await.unwrap();
    assert!(outcome.prompted);
    assert_eq!(notification_status_label(outcome.status), "Enabled");
    events.push(
        flow.apply_permission(PermissionKind::Notifications, outcome)
            .unwrap()
            .unwrap(),
    );

    let mut location = PermissionController::new(PermissionKind::Location, os.clone());
    assert!(location.services_enabled());
    let outcome = location.request().await.unwrap();
    events.push(
        flow.apply_permission(PermissionKind::Location, outcome)
            .unwrap()
            .unwrap(),
    );

    events.push(flow.advance().unwrap());

    assert_eq!(flow.current(), Screen::Main);
    assert!(flow.is_complete());
    assert_eq!(os.prompt_count(), 2);

    // Every proceed signal arrives in order, capped by the completion.
    let shape: Vec<&str> = events
        .iter()
        .map(|event| match event {
            Event::ScreenAdvanced { .. } => "advanced",
            Event::FlowCompleted { .. } => "completed",
            other => panic!("unexpected event {other:?}"),
        })
        .collect();
    assert_eq!(
        shape,
        ["advanced", "advanced", "advanced", "advanced", "completed"]
    );
}

#[tokio::test]
async fn predenied_location_offers_settings_instead_of_prompt() {
    let os = ScriptedOs::new();
    os.set_status(PermissionKind::Location, PermissionStatus::Denied);

    let mut flow = flow_at_notifications();
    let mut notifications =
        PermissionController::new(PermissionKind::Notifications, os.clone());
    let outcome = notifications.request().await.unwrap();
    flow.apply_permission(PermissionKind::Notifications, outcome)
        .unwrap();
    assert_eq!(flow.current(), Screen::Location);

    // Tapping "Allow Location Access" with a standing denial.
    let mut location = PermissionController::new(PermissionKind::Location, os.clone());
    let outcome = location.request().await.unwrap();
    assert_eq!(outcome.status, PermissionStatus::Denied);
    assert!(!outcome.prompted);
    assert_eq!(os.prompt_count(), 1, "only the notifications prompt ran");

    let event = flow
        .apply_permission(PermissionKind::Location, outcome)
        .unwrap();
    assert!(matches!(event, Some(Event::SettingsHintShown { .. })));
    assert_eq!(flow.settings_hint(), Some(PermissionKind::Location));

    // The user declines settings and skips instead.
    let skipped = flow.skip().unwrap();
    assert!(matches!(
        skipped,
        Event::ScreenSkipped {
            to_screen: Screen::PredictiveLearning,
            ..
        }
    ));
    assert!(flow.settings_hint().is_none());
}

#[tokio::test]
async fn late_grant_is_dropped_then_picked_up_by_refresh() {
    let os = ScriptedOs::new();
    let mut controller = PermissionController::new(PermissionKind::Notifications, os.clone());
    os.revoke_when_prompted(controller.liveness());

    // The user backs out while the consent dialog is up; the OS still
    // records their answer, but the screen is gone when it arrives.
    assert!(controller.request().await.is_none());
    assert_eq!(controller.known_status(), PermissionStatus::Undetermined);

    // Re-entering the screen later picks the stored grant up as an
    // out-of-band change.
    match controller.refresh() {
        Some(Event::PermissionChanged { from, to, .. }) => {
            assert_eq!(from, PermissionStatus::Undetermined);
            assert_eq!(to, PermissionStatus::Granted);
        }
        other => panic!("expected PermissionChanged, got {other:?}"),
    }
}

#[tokio::test]
async fn disabled_location_services_gate_before_any_prompt() {
    let os = ScriptedOs::new();
    os.disable_location_services();

    let mut flow = flow_at_notifications();
    let mut notifications =
        PermissionController::new(PermissionKind::Notifications, os.clone());
    let outcome = notifications.request().await.unwrap();
    flow.apply_permission(PermissionKind::Notifications, outcome)
        .unwrap();

    let location = PermissionController::new(PermissionKind::Location, os.clone());
    assert!(!location.services_enabled());

    // The host checks the global switch first and never prompts.
    let event = flow
        .note_services_disabled(PermissionKind::Location)
        .unwrap();
    assert!(matches!(
        event,
        Event::SettingsHintShown {
            kind: PermissionKind::Location,
            ..
        }
    ));
    assert_eq!(os.prompt_count(), 1, "no location prompt was shown");

    // Skip stays available even with services off.
    assert!(flow.skip().is_ok());
    assert_eq!(flow.current(), Screen::PredictiveLearning);
}

#[test]
fn preference_flag_round_trips_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::load_from(&path).unwrap();
    assert!(config.smart_learning_enabled);

    let mut flow = OnboardingFlow::from_config(&config);
    assert!(flow.smart_learning_enabled());

    // Toggling on the predictive learning screen writes through.
    let event = flow.set_smart_learning(false).unwrap();
    assert!(matches!(
        event,
        Event::SmartLearningToggled { enabled: false, .. }
    ));
    config.smart_learning_enabled = false;
    config.save_to(&path).unwrap();

    let reloaded = Config::load_from(&path).unwrap();
    assert!(!reloaded.smart_learning_enabled);
    assert!(!OnboardingFlow::from_config(&reloaded).smart_learning_enabled());
}

#[test]
fn flow_errors_convert_into_core_error() {
    fn drive(flow: &mut OnboardingFlow) -> Result<(), CoreError> {
        flow.skip()?;
        Ok(())
    }

    let mut flow = OnboardingFlow::new();
    match drive(&mut flow) {
        Err(CoreError::Flow(err)) => assert_eq!(err, FlowError::CannotSkip(Screen::Welcome)),
        other => panic!("expected a flow error, got {other:?}"),
    }
}

#[test]
fn config_errors_convert_into_core_error() {
    fn persist(config: &Config, path: &Path) -> Result<(), CoreError> {
        config.save_to(path)?;
        Ok(())
    }

    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing").join("config.toml");
    match persist(&Config::default(), &missing) {
        Err(CoreError::Config(ConfigError::SaveFailed { .. })) => {}
        other => panic!("expected a config error, got {other:?}"),
    }
}

#[test]
fn provider_errors_convert_into_core_error() {
    let err: CoreError = ProviderError::Unreachable("permission daemon gone".into()).into();
    assert!(matches!(err, CoreError::Provider(_)));
    assert!(err.to_string().contains("unreachable"));
}
