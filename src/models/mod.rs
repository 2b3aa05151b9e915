pub mod coordinates;
pub mod destination;
pub mod filters;
pub mod location;
pub mod route;

pub use coordinates::Coordinates;
pub use destination::{DestinationDetail, DestinationSummary, Review};
pub use filters::{DestinationType, DiscoveryFilters, OperatingHours, WalkingDistance};
pub use location::{LocationMode, UserLocation};
pub use route::{RouteDetail, RouteSummary};
