use serde::{Deserialize, Serialize};

/// A reachable destination near a route's stop, as shown on a card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationSummary {
    pub id: String,
    pub name: String,
    /// Human-readable hours text, e.g. "Open until 7:00 PM".
    pub hours: String,
    pub rating: f32,
    pub stops_away: u32,
    pub walking_minutes: u32,
    pub is_favorite: bool,
}

/// Full destination information for a detail view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DestinationDetail {
    #[serde(flatten)]
    pub summary: DestinationSummary,
    pub address: String,
    pub phone: String,
    pub website: String,
    pub description: String,
    pub reviews: Vec<Review>,
    pub photos: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub author: String,
    pub rating: u8,
    pub text: String,
}

impl DestinationDetail {
    /// Transit directions to the destination's address.
    pub fn directions_url(&self) -> String {
        format!(
            "https://www.google.com/maps/dir/?api=1&destination={}&travelmode=transit",
            urlencoding::encode(&self.address)
        )
    }
}

/// Sort destinations favorites-first, then by walking time.
pub fn sort_destinations(destinations: &mut [DestinationSummary]) {
    destinations.sort_by(|a, b| {
        b.is_favorite
            .cmp(&a.is_favorite)
            .then(a.walking_minutes.cmp(&b.walking_minutes))
    });
}
