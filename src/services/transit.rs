use crate::constants::MAX_STOPS_PER_QUERY;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use reqwest::Client;
use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

const TRANSIT_BASE_URL: &str = "https://api.511.org/transit";

#[derive(Clone)]
pub struct TransitClient {
    client: Client,
    api_key: String,
    base_url: String,
}

/// A transit stop near the user.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Stop {
    #[serde(rename = "StopCode")]
    pub stop_code: String,
    #[serde(rename = "StopName")]
    pub stop_name: String,
    #[serde(rename = "Latitude")]
    pub latitude: f64,
    #[serde(rename = "Longitude")]
    pub longitude: f64,
}

impl Stop {
    pub fn coordinates(&self) -> Option<Coordinates> {
        Coordinates::new(self.latitude, self.longitude).ok()
    }
}

/// One monitored vehicle arrival at a stop.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Arrival {
    #[serde(rename = "LineRef", default)]
    pub line_ref: Option<String>,
    #[serde(rename = "LineName")]
    pub line_name: String,
    #[serde(rename = "DirectionRef", default)]
    pub direction: Option<String>,
    #[serde(rename = "ExpectedArrivalTime")]
    pub expected_arrival_time: String,
    #[serde(rename = "VehicleNumber", default)]
    pub vehicle_number: Option<String>,
}

impl Arrival {
    /// Minutes until the expected arrival, floored at zero. `None` when the
    /// timestamp is absent or unparseable.
    pub fn eta_minutes(&self, now: OffsetDateTime) -> Option<i64> {
        let expected = OffsetDateTime::parse(&self.expected_arrival_time, &Rfc3339).ok()?;
        Some((expected - now).whole_minutes().max(0))
    }
}

/// Arrivals grouped under the stop they were monitored at, in
/// nearest-stop order.
#[derive(Debug, Clone)]
pub struct StopArrivals {
    pub stop: Stop,
    pub arrivals: Vec<Arrival>,
}

impl TransitClient {
    pub fn new(api_key: String) -> Self {
        TransitClient {
            client: Client::new(),
            api_key,
            base_url: TRANSIT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        TransitClient {
            client: Client::new(),
            api_key,
            base_url,
        }
    }

    /// Nearest stops to a coordinate, closest first, capped at
    /// [`MAX_STOPS_PER_QUERY`].
    pub async fn stops_near(&self, center: &Coordinates) -> Result<Vec<Stop>> {
        let url = format!("{}/StopsByLatLon", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("latitude", &center.lat.to_string()),
                ("longitude", &center.lng.to_string()),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| AppError::TransitApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::TransitApi(format!(
                "Stops query returned HTTP {}",
                response.status()
            )));
        }

        let data: StopsResponse = response
            .json()
            .await
            .map_err(|e| AppError::TransitApi(format!("Failed to parse stops: {}", e)))?;

        let mut stops = data.stops;
        stops.truncate(MAX_STOPS_PER_QUERY);
        Ok(stops)
    }

    /// Monitored arrivals at one stop.
    pub async fn arrivals(&self, stop_code: &str) -> Result<Vec<Arrival>> {
        let url = format!("{}/StopMonitoring", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("stopCode", stop_code),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| AppError::TransitApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::TransitApi(format!(
                "Stop monitoring returned HTTP {}",
                response.status()
            )));
        }

        let data: StopMonitoringResponse = response
            .json()
            .await
            .map_err(|e| AppError::TransitApi(format!("Failed to parse arrivals: {}", e)))?;

        Ok(data
            .service_delivery
            .stop_monitoring_delivery
            .monitored_stop_visit)
    }

    /// Stops first, then arrivals per stop, concatenated in stop order.
    /// Any per-stop failure fails the whole fetch; the caller retries.
    pub async fn nearest_stops_and_arrivals(
        &self,
        center: &Coordinates,
    ) -> Result<Vec<StopArrivals>> {
        let stops = self.stops_near(center).await?;

        let arrival_futures: Vec<_> = stops
            .iter()
            .map(|stop| self.arrivals(&stop.stop_code))
            .collect();
        let results = futures::future::join_all(arrival_futures).await;

        let mut grouped = Vec::with_capacity(stops.len());
        for (stop, result) in stops.into_iter().zip(results) {
            grouped.push(StopArrivals {
                stop,
                arrivals: result?,
            });
        }

        tracing::debug!(
            stops = grouped.len(),
            arrivals = grouped.iter().map(|g| g.arrivals.len()).sum::<usize>(),
            "Fetched nearest stops and arrivals"
        );

        Ok(grouped)
    }
}

// Transit API response types

#[derive(Debug, Deserialize)]
struct StopsResponse {
    #[serde(rename = "Stops", default)]
    stops: Vec<Stop>,
}

#[derive(Debug, Deserialize)]
struct StopMonitoringResponse {
    #[serde(rename = "ServiceDelivery")]
    service_delivery: ServiceDelivery,
}

#[derive(Debug, Deserialize)]
struct ServiceDelivery {
    #[serde(rename = "StopMonitoringDelivery")]
    stop_monitoring_delivery: StopMonitoringDelivery,
}

#[derive(Debug, Deserialize)]
struct StopMonitoringDelivery {
    #[serde(rename = "MonitoredStopVisit", default)]
    monitored_stop_visit: Vec<Arrival>,
}
