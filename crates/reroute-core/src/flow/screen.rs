use serde::{Deserialize, Serialize};
use std::fmt;

use crate::permission::{PermissionKind, PermissionStatus};

/// The onboarding screens, in fixed order. `Main` is the map screen the
/// flow hands off to; it is part of the sequence so a snapshot can say
/// "onboarding is over".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Welcome,
    SmartLearningIntro,
    Notifications,
    Location,
    PredictiveLearning,
    Main,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Welcome,
        Screen::SmartLearningIntro,
        Screen::Notifications,
        Screen::Location,
        Screen::PredictiveLearning,
        Screen::Main,
    ];

    /// Position within the fixed sequence.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Screen> {
        Self::ALL.get(self.index() + 1).copied()
    }

    /// Only the location screen offers "Skip for Now".
    pub fn is_skippable(self) -> bool {
        matches!(self, Screen::Location)
    }

    /// The permission this screen gates on, if any.
    pub fn required_permission(self) -> Option<PermissionKind> {
        match self {
            Screen::Notifications => Some(PermissionKind::Notifications),
            Screen::Location => Some(PermissionKind::Location),
            _ => None,
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Screen::Welcome => "welcome",
            Screen::SmartLearningIntro => "smart_learning_intro",
            Screen::Notifications => "notifications",
            Screen::Location => "location",
            Screen::PredictiveLearning => "predictive_learning",
            Screen::Main => "main",
        };
        write!(f, "{name}")
    }
}

/// Status badge text on the notifications screen.
pub fn notification_status_label(status: PermissionStatus) -> &'static str {
    if status.is_granted() {
        "Enabled"
    } else {
        "Required permission"
    }
}

/// Caption under the Smart Learning toggle on the predictive learning
/// screen.
pub fn smart_learning_label(enabled: bool) -> &'static str {
    if enabled {
        "Currently enabled"
    } else {
        "Currently disabled"
    }
}
