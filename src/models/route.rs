use crate::constants::MIN_ETA_MINUTES;
use serde::{Deserialize, Serialize};

/// One transit route serving a stop near the user, as shown on a board card.
///
/// `eta` is string-encoded minutes. The mock data source decrements it once
/// per fetch as a display simulation; live sources overwrite it from the
/// arrivals feed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteSummary {
    pub id: String,
    pub route_number: String,
    pub route_name: String,
    pub route_direction: String,
    pub nearest_stop_location: String,
    /// Minutes until the next arrival, string-encoded.
    pub eta: String,
    pub destination_count: u32,
}

impl RouteSummary {
    /// Count the ETA down by one minute, floored at 1. Non-numeric ETAs are
    /// left unchanged.
    pub fn decrement_eta(&mut self) {
        match self.eta.parse::<u32>() {
            Ok(minutes) => {
                self.eta = minutes.saturating_sub(1).max(MIN_ETA_MINUTES).to_string();
            }
            Err(_) => {
                tracing::debug!("Skipping ETA decrement for non-numeric value: {}", self.eta);
            }
        }
    }
}

/// Expanded route information for a detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteDetail {
    pub route_number: String,
    pub route_name: String,
    pub route_direction: String,
    pub nearest_stop_location: String,
    /// ETAs in minutes for the next vehicles, string-encoded.
    pub next_arrivals: Vec<String>,
}

impl RouteDetail {
    /// Count every arrival down by one minute, floored at 1.
    pub fn decrement_arrivals(&mut self) {
        for eta in &mut self.next_arrivals {
            if let Ok(minutes) = eta.parse::<u32>() {
                *eta = minutes.saturating_sub(1).max(MIN_ETA_MINUTES).to_string();
            }
        }
    }

    /// Walking directions to the nearest stop.
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={}&travelmode=walking",
            urlencoding::encode(&self.nearest_stop_location)
        )
    }
}
