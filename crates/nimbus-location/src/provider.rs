//! Platform seam for device positioning.

use async_trait::async_trait;

use nimbus_core::{Coordinates, LocationError};

/// A single location measurement.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationFix {
    pub coordinates: Coordinates,
    /// Horizontal accuracy in meters, when the platform reports one
    pub accuracy_meters: Option<f64>,
    /// Capture time as UNIX milliseconds
    pub captured_at_ms: i64,
}

impl LocationFix {
    /// Fix age relative to a reference instant, in milliseconds.
    /// A fix "from the future" (clock skew) counts as age zero.
    pub fn age_ms(&self, now_ms: i64) -> i64 {
        (now_ms - self.captured_at_ms).max(0)
    }
}

/// Foreground location permission state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// How the platform gates position access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionModel {
    /// Browser-style: no explicit permission API, the position request
    /// itself prompts and fails with a descriptive message.
    Optional,
    /// Native-style: permission must be queried and requested up front.
    Explicit,
}

/// Platform position provider.
///
/// Implementations wrap the OS or browser geolocation facility. All methods
/// are one-shot; the resolver owns retries-via-fallback and caching.
#[async_trait]
pub trait PositionProvider: Send + Sync {
    fn permission_model(&self) -> PermissionModel;

    /// Current foreground permission state. Only meaningful under the
    /// `Explicit` model.
    async fn permission_status(&self) -> Result<PermissionStatus, LocationError>;

    /// Prompt the user for permission and report the resulting state.
    async fn request_permission(&self) -> Result<PermissionStatus, LocationError>;

    /// One-shot high-accuracy position fetch.
    async fn current_position(&self) -> Result<LocationFix, LocationError>;

    /// Most recent cached position known to the platform, if any.
    async fn last_known_position(&self) -> Result<Option<LocationFix>, LocationError>;
}
