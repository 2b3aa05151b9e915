use crate::constants::*;
use std::env;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DataSourceKind {
    /// Query the live transit and places APIs.
    #[default]
    Live,
    /// Serve the fixed seed data with simulated ETA countdown.
    Mock,
}

impl std::str::FromStr for DataSourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "live" => Ok(DataSourceKind::Live),
            "mock" => Ok(DataSourceKind::Mock),
            _ => Err(format!("Invalid data source: {}. Use 'live' or 'mock'", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub google_maps_api_key: String,
    pub transit_api_key: String,
    pub redis_url: Option<String>,
    /// Base URL of the external identity provider's session-verification
    /// endpoint. When absent, middleware-level route protection is disabled.
    pub auth_base_url: Option<String>,
    pub geocoding_base_url: Option<String>,
    pub places_base_url: Option<String>,
    pub transit_base_url: Option<String>,
    pub refresh_interval_secs: u64,
    pub geolocation_timeout_secs: u64,
    /// Installation coordinates for deployments with a known position
    /// (e.g. a lobby kiosk). When absent, location resolution falls back to
    /// the default coordinate with an "unsupported" message.
    pub fixed_position: Option<(f64, f64)>,
    pub data_source: DataSourceKind,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let refresh_interval_secs: u64 = env::var("REFRESH_INTERVAL_SECS")
            .unwrap_or_else(|_| DEFAULT_REFRESH_INTERVAL_SECONDS.to_string())
            .parse()
            .map_err(|_| "Invalid REFRESH_INTERVAL_SECS")?;

        if refresh_interval_secs == 0 {
            return Err("REFRESH_INTERVAL_SECS must be greater than 0".to_string());
        }

        let fixed_position = match (env::var("FIXED_LATITUDE"), env::var("FIXED_LONGITUDE")) {
            (Ok(lat), Ok(lng)) => {
                let lat: f64 = lat.parse().map_err(|_| "Invalid FIXED_LATITUDE")?;
                let lng: f64 = lng.parse().map_err(|_| "Invalid FIXED_LONGITUDE")?;
                Some((lat, lng))
            }
            (Err(_), Err(_)) => None,
            _ => {
                return Err(
                    "FIXED_LATITUDE and FIXED_LONGITUDE must be set together".to_string(),
                )
            }
        };

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY")
                .map_err(|_| "GOOGLE_MAPS_API_KEY must be set")?,
            transit_api_key: env::var("TRANSIT_API_KEY")
                .map_err(|_| "TRANSIT_API_KEY must be set")?,
            redis_url: env::var("REDIS_URL").ok(),
            auth_base_url: env::var("AUTH_BASE_URL").ok(),
            geocoding_base_url: env::var("GEOCODING_BASE_URL").ok(),
            places_base_url: env::var("PLACES_BASE_URL").ok(),
            transit_base_url: env::var("TRANSIT_BASE_URL").ok(),
            refresh_interval_secs,
            geolocation_timeout_secs: env::var("GEOLOCATION_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_GEOLOCATION_TIMEOUT_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid GEOLOCATION_TIMEOUT_SECS")?,
            fixed_position,
            data_source: env::var("DATA_SOURCE")
                .unwrap_or_else(|_| "live".to_string())
                .parse()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
