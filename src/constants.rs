//! Stable application-wide constants.
//!
//! Values here are structural invariants and default fallbacks for
//! env-var-based configuration. They should rarely change. Runtime-tunable
//! knobs live in [`Config`](crate::config::Config) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Location resolution ---

/// Fallback latitude (Union Square, San Francisco) used when no position
/// fix is available.
pub const DEFAULT_LATITUDE: f64 = 37.7879;
/// Fallback longitude (Union Square, San Francisco).
pub const DEFAULT_LONGITUDE: f64 = -122.4075;
/// How long to wait for a high-accuracy position fix before falling back.
/// Overridden by `GEOLOCATION_TIMEOUT_SECS`.
pub const DEFAULT_GEOLOCATION_TIMEOUT_SECONDS: u64 = 15;

// --- Refresh scheduling ---

/// Wall-clock interval between route board refreshes.
/// Overridden by `REFRESH_INTERVAL_SECS`.
pub const DEFAULT_REFRESH_INTERVAL_SECONDS: u64 = 60;
/// Simulated ETAs never decrement below this value (minutes).
pub const MIN_ETA_MINUTES: u32 = 1;

// --- Transit queries ---

/// Maximum number of nearby stops to monitor per board. The stops endpoint
/// returns stops ordered by distance; only the closest slice is queried for
/// arrivals.
pub const MAX_STOPS_PER_QUERY: usize = 5;
/// Number of upcoming arrivals shown on a route detail view.
pub const ROUTE_DETAIL_ARRIVAL_COUNT: usize = 3;

// --- Destination estimates ---

/// Average walking speed used to convert distance to walking minutes.
/// 80 m/min is roughly 4.8 km/h.
pub const WALKING_SPEED_METERS_PER_MINUTE: f64 = 80.0;
