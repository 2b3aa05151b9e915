pub mod data_source;
pub mod geocoding;
pub mod locator;
pub mod places;
pub mod transit;
