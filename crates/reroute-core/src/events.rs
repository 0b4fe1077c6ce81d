use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::flow::Screen;
use crate::permission::{PermissionKind, PermissionStatus};

/// Every externally observable state change produces an Event.
/// The GUI shell polls for events; the navigation host consumes the
/// proceed signals (`ScreenAdvanced`, `ScreenSkipped`, `FlowCompleted`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
    /// A permission kind's OS-reported status changed, either through a
    /// consent prompt or out-of-band in the settings app.
    PermissionChanged {
        kind: PermissionKind,
        from: PermissionStatus,
        to: PermissionStatus,
        at: DateTime<Utc>,
    },
    /// A denied or restricted permission needs the OS settings surface;
    /// the screen shows an open-settings affordance.
    SettingsHintShown {
        kind: PermissionKind,
        at: DateTime<Utc>,
    },
    /// The OS settings surface was launched for this app.
    SettingsOpened {
        at: DateTime<Utc>,
    },
    ScreenAdvanced {
        from_screen: Screen,
        to_screen: Screen,
        at: DateTime<Utc>,
    },
    ScreenSkipped {
        from_screen: Screen,
        to_screen: Screen,
        at: DateTime<Utc>,
    },
    SmartLearningToggled {
        enabled: bool,
        at: DateTime<Utc>,
    },
    /// The user tapped "Start Using App"; the flow reached the main screen.
    FlowCompleted {
        smart_learning_enabled: bool,
        at: DateTime<Utc>,
    },
    /// Full flow state for a polling GUI.
    FlowSnapshot {
        screen: Screen,
        screen_index: usize,
        total_screens: usize,
        settings_hint: Option<PermissionKind>,
        smart_learning_enabled: bool,
        is_complete: bool,
        at: DateTime<Utc>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_carry_a_type_tag() {
        let event = Event::SettingsHintShown {
            kind: PermissionKind::Location,
            at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "SettingsHintShown");
        assert_eq!(json["kind"], "location");
    }

    #[test]
    fn proceed_signal_round_trips() {
        let event = Event::ScreenAdvanced {
            from_screen: Screen::Welcome,
            to_screen: Screen::SmartLearningIntro,
            at: Utc::now(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: Event = serde_json::from_str(&json).unwrap();
        match back {
            Event::ScreenAdvanced {
                from_screen,
                to_screen,
                ..
            } => {
                assert_eq!(from_screen, Screen::Welcome);
                assert_eq!(to_screen, Screen::SmartLearningIntro);
            }
            other => panic!("expected ScreenAdvanced, got {other:?}"),
        }
    }
}
