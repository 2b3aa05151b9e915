use crate::error::{AppError, Result};
use crate::models::Coordinates;
use reqwest::Client;
use serde::Deserialize;

const PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const PHOTO_MAX_WIDTH: u32 = 400;

#[derive(Clone)]
pub struct PlacesClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl PlacesClient {
    pub fn new(api_key: String) -> Self {
        PlacesClient {
            client: Client::new(),
            api_key,
            base_url: PLACES_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        PlacesClient {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Text search biased to a location. A non-OK service status is logged
    /// and surfaced as an empty result set; only transport and decode
    /// failures are errors.
    pub async fn search(
        &self,
        query: &str,
        location: Option<&Coordinates>,
        radius_meters: Option<f64>,
        open_now: bool,
    ) -> Result<Vec<PlaceSummary>> {
        let url = format!("{}/textsearch/json", self.base_url);

        let mut params: Vec<(&str, String)> = vec![
            ("query", query.to_string()),
            ("key", self.api_key.clone()),
        ];
        if let Some(center) = location {
            params.push(("location", format!("{},{}", center.lat, center.lng)));
        }
        if let Some(radius) = radius_meters {
            params.push(("radius", format!("{:.0}", radius)));
        }
        if open_now {
            params.push(("opennow", "true".to_string()));
        }

        tracing::debug!(query = %query, "Place search request");

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| AppError::PlacesApi(format!("Request failed: {}", e)))?;

        let data: TextSearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::PlacesApi(format!("Failed to parse response: {}", e)))?;

        match data.status.as_str() {
            "OK" => Ok(data.results),
            "ZERO_RESULTS" => Ok(Vec::new()),
            status => {
                tracing::error!("Error searching locations: {}", status);
                Ok(Vec::new())
            }
        }
    }

    /// Fetch full details for a place. Non-OK statuses are logged and yield
    /// `None`.
    pub async fn details(&self, place_id: &str) -> Result<Option<PlaceDetail>> {
        let url = format!("{}/details/json", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("place_id", place_id), ("key", &self.api_key)])
            .send()
            .await
            .map_err(|e| AppError::PlacesApi(format!("Request failed: {}", e)))?;

        let data: DetailsResponse = response
            .json()
            .await
            .map_err(|e| AppError::PlacesApi(format!("Failed to parse response: {}", e)))?;

        if data.status != "OK" {
            tracing::error!("Error fetching place details: {}", data.status);
            return Ok(None);
        }

        Ok(data.result)
    }

    /// Resolve a photo reference into a fetchable URL.
    pub fn photo_url(&self, photo_reference: &str) -> String {
        format!(
            "{}/photo?maxwidth={}&photoreference={}&key={}",
            self.base_url, PHOTO_MAX_WIDTH, photo_reference, self.api_key
        )
    }
}

// Places API response types

#[derive(Debug, Deserialize)]
struct TextSearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<PlaceSummary>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    result: Option<PlaceDetail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceDetail {
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub formatted_phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub editorial_summary: Option<EditorialSummary>,
    #[serde(default)]
    pub geometry: Option<PlaceGeometry>,
    #[serde(default)]
    pub opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub reviews: Vec<PlaceReview>,
    #[serde(default)]
    pub photos: Vec<PlacePhoto>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EditorialSummary {
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceGeometry {
    pub location: PlaceLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceLocation {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub open_now: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlaceReview {
    pub author_name: String,
    pub rating: u8,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlacePhoto {
    pub photo_reference: String,
}

/// Hours label for a card. The summary endpoint only exposes whether a
/// place is currently open.
pub fn hours_text(opening_hours: Option<&OpeningHours>) -> String {
    match opening_hours.and_then(|h| h.open_now) {
        Some(true) => "Open now".to_string(),
        Some(false) => "Closed now".to_string(),
        None => "Hours unavailable".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_base_url_override() {
        let client = PlacesClient::with_base_url(
            "test-key".to_string(),
            "http://localhost:4000/places".to_string(),
        );
        assert_eq!(client.base_url, "http://localhost:4000/places");
    }

    #[test]
    fn test_photo_url_contains_reference_and_key() {
        let client = PlacesClient::new("test-key".to_string());
        let url = client.photo_url("abc123");
        assert!(url.contains("photoreference=abc123"));
        assert!(url.contains("key=test-key"));
        assert!(url.contains("maxwidth=400"));
    }

    #[test]
    fn test_search_response_parsing() {
        let body = serde_json::json!({
            "status": "OK",
            "results": [{
                "place_id": "p1",
                "name": "Blue Bottle Coffee",
                "rating": 4.7,
                "geometry": { "location": { "lat": 37.7826, "lng": -122.4074 } },
                "opening_hours": { "open_now": true }
            }]
        });

        let parsed: TextSearchResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.status, "OK");
        assert_eq!(parsed.results.len(), 1);
        assert_eq!(parsed.results[0].name, "Blue Bottle Coffee");
        assert_eq!(parsed.results[0].opening_hours.as_ref().unwrap().open_now, Some(true));
    }

    #[test]
    fn test_hours_text_labels() {
        assert_eq!(
            hours_text(Some(&OpeningHours { open_now: Some(true) })),
            "Open now"
        );
        assert_eq!(
            hours_text(Some(&OpeningHours { open_now: Some(false) })),
            "Closed now"
        );
        assert_eq!(hours_text(None), "Hours unavailable");
    }
}
