use crate::constants::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};

/// A resolved position for the session.
///
/// `using_default == true` implies the coordinates equal the fixed default.
/// `error` and `address_name` are independent optional annotations: a
/// manually entered address outside San Francisco carries both.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub using_default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_name: Option<String>,
}

impl UserLocation {
    /// A live position fix.
    pub fn live(coords: Coordinates) -> Self {
        UserLocation {
            latitude: coords.lat,
            longitude: coords.lng,
            using_default: false,
            error: None,
            address_name: None,
        }
    }

    /// A manually entered, geocoded address. `warning` is set when the
    /// resolved locality is outside San Francisco.
    pub fn manual(coords: Coordinates, address_name: String, warning: Option<String>) -> Self {
        UserLocation {
            latitude: coords.lat,
            longitude: coords.lng,
            using_default: false,
            error: warning,
            address_name: Some(address_name),
        }
    }

    /// The fixed default coordinate with a displayed reason.
    pub fn fallback(reason: impl Into<String>) -> Self {
        UserLocation {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            using_default: true,
            error: Some(reason.into()),
            address_name: None,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        // Fields are only built from validated Coordinates or the fixed
        // default, so this cannot fail.
        Coordinates {
            lat: self.latitude,
            lng: self.longitude,
        }
    }
}

/// Which resolution path produced the active location.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Live geolocation fix.
    Live,
    /// User-supplied address, geocoded.
    Manual,
    /// Exhausted fallback to the fixed default coordinate.
    Default,
}
