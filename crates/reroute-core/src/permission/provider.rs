use async_trait::async_trait;
use url::Url;

use super::status::{PermissionKind, PermissionStatus};
use crate::error::ProviderError;

/// Platform adapter for the OS permission surface.
///
/// One implementation serves both permission kinds -- the per-kind OS
/// APIs differ, but the status shape is identical, so the kind is passed
/// as a value instead of duplicating the seam. The core consumes exactly
/// these capabilities and is agnostic to how a platform provides them.
#[async_trait]
pub trait PermissionProvider: Send + Sync {
    /// Current OS-reported status for the kind. Side-effect free.
    fn status(&self, kind: PermissionKind) -> Result<PermissionStatus, ProviderError>;

    /// Present the consent prompt if the OS still allows one, resolving
    /// when the user answers. When a prior decision exists the OS
    /// short-circuits and returns the stored status without any prompt.
    async fn request_authorization(
        &self,
        kind: PermissionKind,
    ) -> Result<PermissionStatus, ProviderError>;

    /// Global on/off switch for the capability itself (for example the
    /// system-wide location services toggle), independent of per-app
    /// authorization.
    fn services_enabled(&self, _kind: PermissionKind) -> bool {
        true // most platforms have no global switch
    }

    /// Deep link into the OS settings surface for this app, if the
    /// platform exposes one.
    fn settings_url(&self) -> Option<Url> {
        None
    }
}
