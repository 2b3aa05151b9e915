use crate::models::{Coordinates, LocationMode, UserLocation};
use crate::services::geocoding::{GeocodedAddress, GeocodingClient};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// Displayed when no position provider is configured.
const UNSUPPORTED_MESSAGE: &str = "Geolocation is not supported in this environment";
/// Soft warning attached to geocoded addresses outside San Francisco.
const OUTSIDE_SF_WARNING: &str = "Note: This address may not be in San Francisco";

/// Why a position fix failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeolocationError {
    PermissionDenied,
    PositionUnavailable,
    Timeout,
    Other(String),
}

impl GeolocationError {
    /// User-facing message for the failure, one per error kind with the raw
    /// provider message as the fallback.
    pub fn user_message(&self) -> String {
        match self {
            GeolocationError::PermissionDenied => "Location access was denied".to_string(),
            GeolocationError::PositionUnavailable => {
                "Location information is unavailable".to_string()
            }
            GeolocationError::Timeout => {
                "Location request timed out - please try again".to_string()
            }
            GeolocationError::Other(message) => message.clone(),
        }
    }
}

/// Source of high-accuracy position fixes. Every call requests a fresh fix;
/// implementations must not serve cached positions.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    async fn current_position(&self) -> std::result::Result<Coordinates, GeolocationError>;
}

/// Provider for deployments with a known installation position.
pub struct FixedPositionProvider {
    coordinates: Coordinates,
}

impl FixedPositionProvider {
    pub fn new(coordinates: Coordinates) -> Self {
        FixedPositionProvider { coordinates }
    }
}

#[async_trait]
impl GeolocationProvider for FixedPositionProvider {
    async fn current_position(&self) -> std::result::Result<Coordinates, GeolocationError> {
        Ok(self.coordinates)
    }
}

/// Where the resolver is in its fallback chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Unresolved,
    /// Permission was denied; waiting for a manually entered address.
    AwaitingManualInput,
    Resolved(LocationMode),
}

/// Resolves a usable coordinate for the session: live fix first, then a
/// geocoded manual address, then the fixed default. Retries are
/// caller-triggered; the resolver never loops on its own.
pub struct LocationResolver {
    provider: Option<Arc<dyn GeolocationProvider>>,
    geocoder: GeocodingClient,
    fix_timeout: Duration,
    state: RwLock<ResolverState>,
    last_location: RwLock<Option<UserLocation>>,
}

impl LocationResolver {
    pub fn new(
        provider: Option<Arc<dyn GeolocationProvider>>,
        geocoder: GeocodingClient,
        fix_timeout: Duration,
    ) -> Self {
        LocationResolver {
            provider,
            geocoder,
            fix_timeout,
            state: RwLock::new(ResolverState::Unresolved),
            last_location: RwLock::new(None),
        }
    }

    pub async fn state(&self) -> ResolverState {
        *self.state.read().await
    }

    /// The most recently resolved location, if any.
    pub async fn current(&self) -> Option<UserLocation> {
        self.last_location.read().await.clone()
    }

    /// Probe for permission by requesting a fix. Resolves `true` on success
    /// and `false` on every failure; never fails.
    pub async fn resolve_permission(&self) -> bool {
        match self.request_fix().await {
            Ok(coords) => {
                *self.state.write().await = ResolverState::Resolved(LocationMode::Live);
                *self.last_location.write().await = Some(UserLocation::live(coords));
                true
            }
            Err(e) => {
                tracing::warn!("Location permission error: {}", e.user_message());
                *self.state.write().await = ResolverState::AwaitingManualInput;
                false
            }
        }
    }

    /// Request a fresh position fix, falling back to the default coordinate
    /// with a displayed reason on any failure.
    pub async fn resolve_location(&self) -> UserLocation {
        let location = match self.request_fix().await {
            Ok(coords) => {
                *self.state.write().await = ResolverState::Resolved(LocationMode::Live);
                UserLocation::live(coords)
            }
            Err(e) => {
                tracing::warn!("Geolocation error: {}", e.user_message());
                *self.state.write().await = ResolverState::Resolved(LocationMode::Default);
                UserLocation::fallback(e.user_message())
            }
        };

        *self.last_location.write().await = Some(location.clone());
        location
    }

    /// Geocode a manually entered address. Returns `None` when the service
    /// has no answer (no results, non-OK status, or a transport error —
    /// all logged); the caller decides whether to re-prompt.
    pub async fn geocode_address(&self, address: &str) -> Option<UserLocation> {
        let normalized = normalize_address(address);

        let geocoded = match self.geocoder.geocode(&normalized).await {
            Ok(Some(geocoded)) => geocoded,
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Error geocoding address: {}", e);
                return None;
            }
        };

        if !geocoded.in_san_francisco {
            tracing::warn!(
                "Address is not in San Francisco: {}",
                geocoded.formatted_address
            );
        }

        let location = location_from_geocoded(geocoded);
        *self.state.write().await = ResolverState::Resolved(LocationMode::Manual);
        *self.last_location.write().await = Some(location.clone());
        Some(location)
    }

    async fn request_fix(&self) -> std::result::Result<Coordinates, GeolocationError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or_else(|| GeolocationError::Other(UNSUPPORTED_MESSAGE.to_string()))?;

        match tokio::time::timeout(self.fix_timeout, provider.current_position()).await {
            Ok(result) => result,
            Err(_) => Err(GeolocationError::Timeout),
        }
    }
}

/// Append ", San Francisco, CA" unless the input already names the city.
fn normalize_address(address: &str) -> String {
    let lower = address.to_lowercase();
    if lower.contains("san francisco") || lower.contains("sf,") {
        address.to_string()
    } else {
        format!("{}, San Francisco, CA", address)
    }
}

fn location_from_geocoded(geocoded: GeocodedAddress) -> UserLocation {
    let warning = if geocoded.in_san_francisco {
        None
    } else {
        Some(OUTSIDE_SF_WARNING.to_string())
    };
    UserLocation::manual(geocoded.coordinates, geocoded.formatted_address, warning)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};

    struct FailingProvider {
        error: GeolocationError,
    }

    #[async_trait]
    impl GeolocationProvider for FailingProvider {
        async fn current_position(&self) -> std::result::Result<Coordinates, GeolocationError> {
            Err(self.error.clone())
        }
    }

    struct HangingProvider;

    #[async_trait]
    impl GeolocationProvider for HangingProvider {
        async fn current_position(&self) -> std::result::Result<Coordinates, GeolocationError> {
            futures::future::pending().await
        }
    }

    fn resolver_with(provider: Option<Arc<dyn GeolocationProvider>>) -> LocationResolver {
        LocationResolver::new(
            provider,
            GeocodingClient::new("test-key".to_string()),
            Duration::from_secs(15),
        )
    }

    #[tokio::test]
    async fn live_fix_resolves_without_fallback() {
        let coords = Coordinates::new(37.7749, -122.4194).unwrap();
        let resolver = resolver_with(Some(Arc::new(FixedPositionProvider::new(coords))));

        let location = resolver.resolve_location().await;

        assert!(!location.using_default);
        assert_eq!(location.latitude, 37.7749);
        assert!(location.error.is_none());
        assert_eq!(
            resolver.state().await,
            ResolverState::Resolved(LocationMode::Live)
        );
    }

    #[tokio::test]
    async fn permission_denied_maps_to_specific_message() {
        let resolver = resolver_with(Some(Arc::new(FailingProvider {
            error: GeolocationError::PermissionDenied,
        })));

        let location = resolver.resolve_location().await;

        assert!(location.using_default);
        assert_eq!(location.latitude, DEFAULT_LATITUDE);
        assert_eq!(location.longitude, DEFAULT_LONGITUDE);
        assert_eq!(location.error.as_deref(), Some("Location access was denied"));
    }

    #[tokio::test]
    async fn position_unavailable_maps_to_specific_message() {
        let resolver = resolver_with(Some(Arc::new(FailingProvider {
            error: GeolocationError::PositionUnavailable,
        })));

        let location = resolver.resolve_location().await;
        assert!(location.using_default);
        assert_eq!(
            location.error.as_deref(),
            Some("Location information is unavailable")
        );
    }

    #[tokio::test]
    async fn timeout_maps_to_specific_message() {
        let resolver = resolver_with(Some(Arc::new(FailingProvider {
            error: GeolocationError::Timeout,
        })));

        let location = resolver.resolve_location().await;
        assert!(location.using_default);
        assert_eq!(
            location.error.as_deref(),
            Some("Location request timed out - please try again")
        );
    }

    #[tokio::test]
    async fn other_errors_surface_raw_message() {
        let resolver = resolver_with(Some(Arc::new(FailingProvider {
            error: GeolocationError::Other("satellite fell over".to_string()),
        })));

        let location = resolver.resolve_location().await;
        assert!(location.using_default);
        assert_eq!(location.error.as_deref(), Some("satellite fell over"));
    }

    #[tokio::test]
    async fn missing_provider_is_unsupported() {
        let resolver = resolver_with(None);

        let location = resolver.resolve_location().await;
        assert!(location.using_default);
        assert_eq!(location.error.as_deref(), Some(UNSUPPORTED_MESSAGE));
        assert_eq!(
            resolver.state().await,
            ResolverState::Resolved(LocationMode::Default)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_times_out() {
        let resolver = LocationResolver::new(
            Some(Arc::new(HangingProvider)),
            GeocodingClient::new("test-key".to_string()),
            Duration::from_secs(15),
        );

        let location = resolver.resolve_location().await;
        assert!(location.using_default);
        assert_eq!(
            location.error.as_deref(),
            Some("Location request timed out - please try again")
        );
    }

    #[tokio::test]
    async fn permission_probe_never_fails() {
        let granted = resolver_with(Some(Arc::new(FixedPositionProvider::new(
            Coordinates::new(37.7879, -122.4075).unwrap(),
        ))))
        .resolve_permission()
        .await;
        assert!(granted);

        let denied_resolver = resolver_with(Some(Arc::new(FailingProvider {
            error: GeolocationError::PermissionDenied,
        })));
        assert!(!denied_resolver.resolve_permission().await);
        assert_eq!(
            denied_resolver.state().await,
            ResolverState::AwaitingManualInput
        );

        assert!(!resolver_with(None).resolve_permission().await);
    }

    #[test]
    fn normalize_appends_city_suffix() {
        assert_eq!(
            normalize_address("1 Market St"),
            "1 Market St, San Francisco, CA"
        );
    }

    #[test]
    fn normalize_does_not_double_append() {
        assert_eq!(
            normalize_address("1 Market St, San Francisco, CA"),
            "1 Market St, San Francisco, CA"
        );
        assert_eq!(normalize_address("1 Market St, SF, CA"), "1 Market St, SF, CA");
    }

    #[test]
    fn geocoded_outside_sf_keeps_coordinates_with_warning() {
        let geocoded = GeocodedAddress {
            coordinates: Coordinates::new(37.8044, -122.2712).unwrap(),
            formatted_address: "Oakland, CA, USA".to_string(),
            in_san_francisco: false,
        };

        let location = location_from_geocoded(geocoded);
        assert!(!location.using_default);
        assert_eq!(location.latitude, 37.8044);
        assert_eq!(location.error.as_deref(), Some(OUTSIDE_SF_WARNING));
        assert_eq!(location.address_name.as_deref(), Some("Oakland, CA, USA"));
    }

    #[test]
    fn geocoded_in_sf_has_no_warning() {
        let geocoded = GeocodedAddress {
            coordinates: Coordinates::new(37.7941, -122.3949).unwrap(),
            formatted_address: "1 Market St, San Francisco, CA 94105, USA".to_string(),
            in_san_francisco: true,
        };

        let location = location_from_geocoded(geocoded);
        assert!(location.error.is_none());
        assert_eq!(
            location.address_name.as_deref(),
            Some("1 Market St, San Francisco, CA 94105, USA")
        );
    }
}
