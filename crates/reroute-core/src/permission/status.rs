use serde::{Deserialize, Serialize};
use std::fmt;

/// OS-reported authorization state for a single permission kind.
///
/// Transitions are driven only by the host OS; this library never
/// invents them. Provisional and ephemeral grants collapse to `Granted`
/// at the provider boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// The user has not been asked yet; a consent prompt is still possible.
    Undetermined,
    Granted,
    Denied,
    /// Blocked by policy (parental controls, MDM); the user cannot grant it.
    Restricted,
}

impl PermissionStatus {
    pub fn is_granted(self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }

    /// Whether the OS would still present a consent prompt.
    pub fn allows_prompt(self) -> bool {
        matches!(self, PermissionStatus::Undetermined)
    }

    /// Denied and restricted can only change through the OS settings
    /// surface, never through another in-app prompt.
    pub fn needs_settings(self) -> bool {
        matches!(self, PermissionStatus::Denied | PermissionStatus::Restricted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionStatus::Undetermined => write!(f, "undetermined"),
            PermissionStatus::Granted => write!(f, "granted"),
            PermissionStatus::Denied => write!(f, "denied"),
            PermissionStatus::Restricted => write!(f, "restricted"),
        }
    }
}

/// The category of OS-gated capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionKind {
    Notifications,
    Location,
}

impl fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PermissionKind::Notifications => write!(f, "notifications"),
            PermissionKind::Location => write!(f, "location"),
        }
    }
}

/// Live authorization state for one permission kind on one screen.
///
/// Created on screen mount, refreshed on query, mutated only by the OS
/// callback delivering a new status. Discarded with the screen; never
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionState {
    pub kind: PermissionKind,
    pub status: PermissionStatus,
}
