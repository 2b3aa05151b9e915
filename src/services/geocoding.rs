use crate::error::{AppError, Result};
use crate::models::Coordinates;
use reqwest::Client;
use serde::Deserialize;

const GEOCODING_BASE_URL: &str = "https://maps.googleapis.com/maps/api/geocode";

#[derive(Clone)]
pub struct GeocodingClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// Outcome of a successful geocoding call.
#[derive(Debug, Clone)]
pub struct GeocodedAddress {
    pub coordinates: Coordinates,
    pub formatted_address: String,
    /// Whether any locality component resolves to San Francisco.
    pub in_san_francisco: bool,
}

impl GeocodingClient {
    pub fn new(api_key: String) -> Self {
        GeocodingClient {
            client: Client::new(),
            api_key,
            base_url: GEOCODING_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        GeocodingClient {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Geocode a free-text address. Returns `Ok(None)` when the service
    /// reports a non-OK status or no results; `Err` only on transport or
    /// decode failures.
    pub async fn geocode(&self, address: &str) -> Result<Option<GeocodedAddress>> {
        let url = format!("{}/json", self.base_url);

        tracing::debug!(address = %address, "Geocoding request");

        let response = self
            .client
            .get(&url)
            .query(&[("address", address), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| AppError::GeocodingApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::GeocodingApi(format!(
                "Geocoding API error: {}",
                status
            )));
        }

        let data: GeocodeResponse = response
            .json()
            .await
            .map_err(|e| AppError::GeocodingApi(format!("Failed to parse response: {}", e)))?;

        if data.status != "OK" || data.results.is_empty() {
            tracing::warn!(
                status = %data.status,
                "Geocoding returned no results for address: {}",
                address
            );
            return Ok(None);
        }

        let result = &data.results[0];
        let location = &result.geometry.location;
        let coordinates = Coordinates::new(location.lat, location.lng)
            .map_err(AppError::GeocodingApi)?;

        let in_san_francisco = result.address_components.iter().any(|component| {
            component.types.iter().any(|t| t == "locality")
                && component.long_name.to_lowercase().contains("san francisco")
        });

        Ok(Some(GeocodedAddress {
            coordinates,
            formatted_address: result.formatted_address.clone(),
            in_san_francisco,
        }))
    }
}

// Geocoding API response types

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
    formatted_address: String,
    #[serde(default)]
    address_components: Vec<AddressComponent>,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: GeocodeLocation,
}

#[derive(Debug, Deserialize)]
struct GeocodeLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct AddressComponent {
    long_name: String,
    #[serde(default)]
    types: Vec<String>,
}
