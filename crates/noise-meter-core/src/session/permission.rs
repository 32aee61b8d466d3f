use crate::CoreResult;

use tracing::{debug, error, info, instrument};

/// Microphone authorization as last reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Permission {
    /// Not yet resolved, or the request failed.
    #[default]
    Unknown,
    /// Explicitly granted.
    Granted,
    /// Explicitly denied.
    Denied,
}

impl Permission {
    /// Only an explicit grant allows recording.
    pub fn is_granted(self) -> bool {
        matches!(self, Permission::Granted)
    }
}

impl From<bool> for Permission {
    fn from(granted: bool) -> Self {
        if granted {
            Permission::Granted
        } else {
            Permission::Denied
        }
    }
}

/// Host capability that answers a microphone authorization request.
pub trait MicrophoneAccess {
    /// Ask the host for microphone access. `Ok(true)` only on explicit grant.
    fn request(&self) -> CoreResult<bool>;
}

/// Requests microphone access once and remembers the outcome.
#[derive(Debug, Default)]
pub struct PermissionGate {
    permission: Permission,
    requested: bool,
}

impl PermissionGate {
    /// A gate that has not asked yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask `access` for authorization. Only the first call reaches the host.
    ///
    /// A failed request is logged and leaves the permission [`Permission::Unknown`].
    #[instrument(skip(self, access))]
    pub fn initialize<A: MicrophoneAccess + ?Sized>(&mut self, access: &A) -> Permission {
        if self.requested {
            debug!(permission = ?self.permission, "Permission already requested");
            return self.permission;
        }
        self.requested = true;

        match access.request() {
            Ok(granted) => {
                info!("Permission granted: {}", granted);
                self.permission = Permission::from(granted);
            }
            Err(e) => {
                error!(error = ?e, "Microphone permission request failed");
            }
        }

        self.permission
    }

    /// Current permission.
    pub fn permission(&self) -> Permission {
        self.permission
    }

    /// Whether recording may start.
    pub fn is_granted(&self) -> bool {
        self.permission.is_granted()
    }
}
