//! Location resolution with layered fallback.

use chrono::Utc;
use parking_lot::Mutex;

use nimbus_core::{LocationConfig, LocationError};

use crate::provider::{LocationFix, PermissionModel, PermissionStatus, PositionProvider};

/// Classify a browser-style failure message into the typed taxonomy.
///
/// The web geolocation facility reports everything as a message string; the
/// wording distinguishes permission problems and insecure origins.
fn classify_web_error(message: &str) -> LocationError {
    let lower = message.to_lowercase();
    if lower.contains("denied") || lower.contains("permission") {
        LocationError::PermissionDenied
    } else if lower.contains("secure") || lower.contains("https") {
        LocationError::InsecureContext
    } else {
        LocationError::Other(message.to_string())
    }
}

/// Resolves the device position through a provider-specific fallback chain
/// and holds the single current-fix slot.
///
/// Resolution is idempotent and safe to re-invoke; overlapping invocations
/// are not deduplicated, the most recent to complete wins the fix slot.
pub struct LocationResolver<P> {
    provider: P,
    config: LocationConfig,
    current: Mutex<Option<LocationFix>>,
}

impl<P: PositionProvider> LocationResolver<P> {
    pub fn new(provider: P, config: LocationConfig) -> Self {
        Self {
            provider,
            config,
            current: Mutex::new(None),
        }
    }

    /// The held fix, if any.
    pub fn current_fix(&self) -> Option<LocationFix> {
        self.current.lock().clone()
    }

    /// Return the held fix, acquiring one when none is held yet.
    pub async fn resolve(&self) -> Result<LocationFix, LocationError> {
        if let Some(fix) = self.current_fix() {
            return Ok(fix);
        }
        self.refresh().await
    }

    /// Force a new resolution attempt, bypassing the held fix.
    pub async fn refresh(&self) -> Result<LocationFix, LocationError> {
        let fix = self.acquire().await?;
        tracing::debug!(
            "Resolved position ({:.4}, {:.4})",
            fix.coordinates.lat,
            fix.coordinates.lon
        );
        *self.current.lock() = Some(fix.clone());
        Ok(fix)
    }

    async fn acquire(&self) -> Result<LocationFix, LocationError> {
        match self.provider.permission_model() {
            PermissionModel::Optional => self.acquire_optional().await,
            PermissionModel::Explicit => self.acquire_explicit().await,
        }
    }

    /// Browser-style: one direct attempt, classify the failure message.
    async fn acquire_optional(&self) -> Result<LocationFix, LocationError> {
        self.provider.current_position().await.map_err(|err| {
            let classified = match err {
                LocationError::Other(message) => classify_web_error(&message),
                other => other,
            };
            tracing::info!("Web position request failed: {}", classified);
            classified
        })
    }

    /// Native-style: permission gate, live attempt, bounded last-known
    /// fallback.
    async fn acquire_explicit(&self) -> Result<LocationFix, LocationError> {
        let mut status = self.provider.permission_status().await?;
        if status != PermissionStatus::Granted {
            status = self.provider.request_permission().await?;
        }
        if status != PermissionStatus::Granted {
            return Err(LocationError::PermissionDenied);
        }

        match self.provider.current_position().await {
            Ok(fix) => Ok(fix),
            Err(live_err) => {
                tracing::info!("Live position failed ({}), trying last known", live_err);
                self.acceptable_last_known().await.ok_or(LocationError::StaleOrUnavailable)
            }
        }
    }

    /// Last-known fix, accepted only within the staleness and accuracy
    /// bounds. A failed read counts as no fix.
    async fn acceptable_last_known(&self) -> Option<LocationFix> {
        let fix = self.provider.last_known_position().await.ok().flatten()?;

        let now_ms = Utc::now().timestamp_millis();
        let max_age_ms = (self.config.max_last_known_age_secs as i64).saturating_mul(1000);
        if fix.age_ms(now_ms) > max_age_ms {
            tracing::debug!("Last known fix too old ({} ms)", fix.age_ms(now_ms));
            return None;
        }

        let accuracy = fix.accuracy_meters.unwrap_or(f64::INFINITY);
        if accuracy > self.config.max_last_known_accuracy_m {
            tracing::debug!("Last known fix too coarse ({} m)", accuracy);
            return None;
        }

        Some(fix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nimbus_core::Coordinates;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        model: PermissionModel,
        status: PermissionStatus,
        status_after_request: PermissionStatus,
        live: Result<LocationFix, LocationError>,
        last_known: Option<LocationFix>,
        permission_requests: AtomicUsize,
    }

    impl FakeProvider {
        fn native() -> Self {
            Self {
                model: PermissionModel::Explicit,
                status: PermissionStatus::Granted,
                status_after_request: PermissionStatus::Granted,
                live: Ok(fix_at(48.85, 2.35, Some(20.0), now_ms())),
                last_known: None,
                permission_requests: AtomicUsize::new(0),
            }
        }

        fn web() -> Self {
            Self {
                model: PermissionModel::Optional,
                ..Self::native()
            }
        }
    }

    #[async_trait]
    impl PositionProvider for FakeProvider {
        fn permission_model(&self) -> PermissionModel {
            self.model
        }

        async fn permission_status(&self) -> Result<PermissionStatus, LocationError> {
            Ok(self.status)
        }

        async fn request_permission(&self) -> Result<PermissionStatus, LocationError> {
            self.permission_requests.fetch_add(1, Ordering::SeqCst);
            Ok(self.status_after_request)
        }

        async fn current_position(&self) -> Result<LocationFix, LocationError> {
            self.live.clone()
        }

        async fn last_known_position(&self) -> Result<Option<LocationFix>, LocationError> {
            Ok(self.last_known.clone())
        }
    }

    fn now_ms() -> i64 {
        Utc::now().timestamp_millis()
    }

    fn fix_at(lat: f64, lon: f64, accuracy: Option<f64>, captured_at_ms: i64) -> LocationFix {
        LocationFix {
            coordinates: Coordinates::new(lat, lon),
            accuracy_meters: accuracy,
            captured_at_ms,
        }
    }

    fn resolver(provider: FakeProvider) -> LocationResolver<FakeProvider> {
        LocationResolver::new(provider, LocationConfig::default())
    }

    #[tokio::test]
    async fn test_live_fix_wins() {
        let resolver = resolver(FakeProvider::native());
        let fix = resolver.refresh().await.unwrap();
        assert_eq!(fix.coordinates, Coordinates::new(48.85, 2.35));
        assert_eq!(resolver.current_fix(), Some(fix));
    }

    #[tokio::test]
    async fn test_recent_last_known_accepted() {
        let mut provider = FakeProvider::native();
        provider.live = Err(LocationError::Other("gps timeout".into()));
        provider.last_known = Some(fix_at(48.0, 2.0, Some(200.0), now_ms() - 10 * 60 * 1000));

        let fix = resolver(provider).refresh().await.unwrap();
        assert_eq!(fix.coordinates, Coordinates::new(48.0, 2.0));
    }

    #[tokio::test]
    async fn test_stale_last_known_rejected() {
        let mut provider = FakeProvider::native();
        provider.live = Err(LocationError::Other("gps timeout".into()));
        provider.last_known = Some(fix_at(48.0, 2.0, Some(200.0), now_ms() - 20 * 60 * 1000));

        let err = resolver(provider).refresh().await.unwrap_err();
        assert_eq!(err, LocationError::StaleOrUnavailable);
    }

    #[tokio::test]
    async fn test_coarse_last_known_rejected() {
        let mut provider = FakeProvider::native();
        provider.live = Err(LocationError::Other("gps timeout".into()));
        provider.last_known = Some(fix_at(48.0, 2.0, Some(6000.0), now_ms() - 60 * 1000));

        let err = resolver(provider).refresh().await.unwrap_err();
        assert_eq!(err, LocationError::StaleOrUnavailable);
    }

    #[tokio::test]
    async fn test_unknown_accuracy_rejected() {
        let mut provider = FakeProvider::native();
        provider.live = Err(LocationError::Other("gps timeout".into()));
        provider.last_known = Some(fix_at(48.0, 2.0, None, now_ms() - 60 * 1000));

        let err = resolver(provider).refresh().await.unwrap_err();
        assert_eq!(err, LocationError::StaleOrUnavailable);
    }

    #[tokio::test]
    async fn test_no_last_known_fails() {
        let mut provider = FakeProvider::native();
        provider.live = Err(LocationError::Other("gps timeout".into()));

        let err = resolver(provider).refresh().await.unwrap_err();
        assert_eq!(err, LocationError::StaleOrUnavailable);
    }

    #[tokio::test]
    async fn test_permission_requested_once_then_denied() {
        let mut provider = FakeProvider::native();
        provider.status = PermissionStatus::Undetermined;
        provider.status_after_request = PermissionStatus::Denied;

        let resolver = resolver(provider);
        let err = resolver.refresh().await.unwrap_err();
        assert_eq!(err, LocationError::PermissionDenied);
        assert_eq!(
            resolver.provider.permission_requests.load(Ordering::SeqCst),
            1
        );
        assert!(resolver.current_fix().is_none());
    }

    #[tokio::test]
    async fn test_granted_permission_not_rerequested() {
        let resolver = resolver(FakeProvider::native());
        resolver.refresh().await.unwrap();
        assert_eq!(
            resolver.provider.permission_requests.load(Ordering::SeqCst),
            0
        );
    }

    #[tokio::test]
    async fn test_web_denied_message_classified() {
        let mut provider = FakeProvider::web();
        provider.live = Err(LocationError::Other(
            "User denied Geolocation permission".into(),
        ));

        let err = resolver(provider).refresh().await.unwrap_err();
        assert_eq!(err, LocationError::PermissionDenied);
    }

    #[tokio::test]
    async fn test_web_insecure_context_classified() {
        let mut provider = FakeProvider::web();
        provider.live = Err(LocationError::Other(
            "Geolocation is only available in secure origins such as HTTPS".into(),
        ));

        let err = resolver(provider).refresh().await.unwrap_err();
        assert_eq!(err, LocationError::InsecureContext);
    }

    #[tokio::test]
    async fn test_web_other_message_passes_through() {
        let mut provider = FakeProvider::web();
        provider.live = Err(LocationError::Other("position unavailable".into()));

        let err = resolver(provider).refresh().await.unwrap_err();
        assert_eq!(err, LocationError::Other("position unavailable".into()));
    }

    #[tokio::test]
    async fn test_resolve_reuses_held_fix() {
        let resolver = resolver(FakeProvider::native());
        let first = resolver.resolve().await.unwrap();
        let second = resolver.resolve().await.unwrap();
        assert_eq!(first, second);
    }
}
