use crate::constants::ROUTE_DETAIL_ARRIVAL_COUNT;
use crate::error::Result;
use crate::favorites::{FavoriteStore, FavoritesHandle};
use crate::models::destination::sort_destinations;
use crate::models::{
    Coordinates, DestinationDetail, DestinationSummary, DiscoveryFilters, Review, RouteDetail,
    RouteSummary,
};
use crate::services::places::{hours_text, PlacesClient};
use crate::services::transit::{Stop, StopArrivals, TransitClient};
use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;

/// Shown when a route has no parseable arrival time. The ETA countdown
/// skips non-numeric values, so this survives refreshes unchanged.
const ETA_UNKNOWN: &str = "--";

/// Source of route and destination data for boards. Production and test
/// implementations are interchangeable; the scheduler and handlers only see
/// this trait.
#[async_trait]
pub trait DataSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_routes(
        &self,
        location: &Coordinates,
        filters: &DiscoveryFilters,
    ) -> Result<Vec<RouteSummary>>;

    async fn fetch_route_detail(
        &self,
        route_id: &str,
        location: &Coordinates,
    ) -> Result<Option<RouteDetail>>;

    async fn fetch_destinations(
        &self,
        route_id: &str,
        location: &Coordinates,
        filters: &DiscoveryFilters,
    ) -> Result<Vec<DestinationSummary>>;

    async fn fetch_destination_detail(
        &self,
        destination_id: &str,
        location: &Coordinates,
    ) -> Result<Option<DestinationDetail>>;
}

// ---------------------------------------------------------------------------
// Live source
// ---------------------------------------------------------------------------

/// Live data source over the transit and places APIs. Calls are independent
/// and unsynchronized; there is no shared response cache or in-flight
/// deduplication — two boards asking the same question each ask upstream.
pub struct TransitDataSource {
    transit: TransitClient,
    places: PlacesClient,
    favorites: FavoritesHandle,
}

struct RouteBuild {
    id: String,
    route_number: String,
    route_name: String,
    route_direction: String,
    stop: Stop,
    eta_minutes: Option<i64>,
}

impl TransitDataSource {
    pub fn new(transit: TransitClient, places: PlacesClient, favorites: FavoritesHandle) -> Self {
        TransitDataSource {
            transit,
            places,
            favorites,
        }
    }

    /// Group arrivals by line at their nearest monitored stop, keeping the
    /// soonest arrival as the ETA. Stop order is nearest-first, so the first
    /// stop seen for a line is its nearest stop.
    fn build_routes(grouped: &[StopArrivals], now: OffsetDateTime) -> Vec<RouteBuild> {
        let mut builds: Vec<RouteBuild> = Vec::new();

        for stop_arrivals in grouped {
            for arrival in &stop_arrivals.arrivals {
                let route_number = arrival
                    .line_ref
                    .clone()
                    .unwrap_or_else(|| arrival.line_name.clone());
                let id = format!("{}@{}", route_number, stop_arrivals.stop.stop_code);
                let eta = arrival.eta_minutes(now);

                match builds.iter_mut().find(|b| b.id == id) {
                    Some(existing) => {
                        if let Some(minutes) = eta {
                            if existing.eta_minutes.map_or(true, |e| minutes < e) {
                                existing.eta_minutes = Some(minutes);
                            }
                        }
                    }
                    None => builds.push(RouteBuild {
                        id,
                        route_number,
                        route_name: arrival.line_name.clone(),
                        route_direction: arrival.direction.clone().unwrap_or_default(),
                        stop: stop_arrivals.stop.clone(),
                        eta_minutes: eta,
                    }),
                }
            }
        }

        builds
    }

    /// How many matching destinations exist around a stop. Search failures
    /// are logged and counted as zero.
    async fn destination_count(&self, stop: &Stop, filters: &DiscoveryFilters) -> u32 {
        let Some(center) = stop.coordinates() else {
            return 0;
        };

        match self
            .places
            .search(
                filters.destination_type.search_query(),
                Some(&center),
                Some(filters.walking_distance.radius_meters()),
                true,
            )
            .await
        {
            Ok(results) => results.len() as u32,
            Err(e) => {
                tracing::warn!("Destination count lookup failed for {}: {}", stop.stop_name, e);
                0
            }
        }
    }

    fn eta_string(eta_minutes: Option<i64>) -> String {
        match eta_minutes {
            Some(minutes) => minutes.to_string(),
            None => ETA_UNKNOWN.to_string(),
        }
    }

    /// 1-based rank of the stop nearest to a destination, matching the
    /// "N stops away" card label.
    fn stops_away(stops: &[Stop], destination: &Coordinates) -> u32 {
        stops
            .iter()
            .enumerate()
            .filter_map(|(idx, stop)| {
                stop.coordinates()
                    .map(|c| (idx, c.distance_to(destination)))
            })
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(idx, _)| idx as u32 + 1)
            .unwrap_or(1)
    }

    fn find_stop<'a>(route_id: &str, stops: &'a [Stop]) -> Option<&'a Stop> {
        stops
            .iter()
            .find(|stop| route_id.ends_with(&format!("@{}", stop.stop_code)))
    }
}

#[async_trait]
impl DataSource for TransitDataSource {
    fn name(&self) -> &'static str {
        "live"
    }

    async fn fetch_routes(
        &self,
        location: &Coordinates,
        filters: &DiscoveryFilters,
    ) -> Result<Vec<RouteSummary>> {
        let grouped = self.transit.nearest_stops_and_arrivals(location).await?;
        let builds = Self::build_routes(&grouped, OffsetDateTime::now_utc());

        let count_futures: Vec<_> = builds
            .iter()
            .map(|build| self.destination_count(&build.stop, filters))
            .collect();
        let counts = futures::future::join_all(count_futures).await;

        Ok(builds
            .into_iter()
            .zip(counts)
            .map(|(build, destination_count)| RouteSummary {
                id: build.id,
                route_number: build.route_number,
                route_name: build.route_name,
                route_direction: build.route_direction,
                nearest_stop_location: build.stop.stop_name.clone(),
                eta: Self::eta_string(build.eta_minutes),
                destination_count,
            })
            .collect())
    }

    async fn fetch_route_detail(
        &self,
        route_id: &str,
        location: &Coordinates,
    ) -> Result<Option<RouteDetail>> {
        let grouped = self.transit.nearest_stops_and_arrivals(location).await?;
        let now = OffsetDateTime::now_utc();

        for stop_arrivals in &grouped {
            let matching: Vec<_> = stop_arrivals
                .arrivals
                .iter()
                .filter(|arrival| {
                    let number = arrival.line_ref.as_deref().unwrap_or(&arrival.line_name);
                    route_id == format!("{}@{}", number, stop_arrivals.stop.stop_code)
                })
                .collect();

            let Some(first) = matching.first() else {
                continue;
            };

            let mut etas: Vec<i64> = matching
                .iter()
                .filter_map(|arrival| arrival.eta_minutes(now))
                .collect();
            etas.sort_unstable();
            etas.truncate(ROUTE_DETAIL_ARRIVAL_COUNT);

            return Ok(Some(RouteDetail {
                route_number: first
                    .line_ref
                    .clone()
                    .unwrap_or_else(|| first.line_name.clone()),
                route_name: first.line_name.clone(),
                route_direction: first.direction.clone().unwrap_or_default(),
                nearest_stop_location: stop_arrivals.stop.stop_name.clone(),
                next_arrivals: etas.into_iter().map(|m| m.to_string()).collect(),
            }));
        }

        Ok(None)
    }

    async fn fetch_destinations(
        &self,
        route_id: &str,
        location: &Coordinates,
        filters: &DiscoveryFilters,
    ) -> Result<Vec<DestinationSummary>> {
        let stops = self.transit.stops_near(location).await?;
        let center = Self::find_stop(route_id, &stops)
            .and_then(Stop::coordinates)
            .unwrap_or(*location);

        let results = self
            .places
            .search(
                filters.destination_type.search_query(),
                Some(&center),
                Some(filters.walking_distance.radius_meters()),
                true,
            )
            .await?;

        let store = self.favorites.get()?;
        let mut destinations = Vec::with_capacity(results.len());

        for place in results {
            let Some(coords) = place
                .geometry
                .as_ref()
                .and_then(|g| Coordinates::new(g.location.lat, g.location.lng).ok())
            else {
                continue;
            };

            let walking_minutes = center.walking_minutes_to(&coords);
            if walking_minutes > filters.walking_distance.minutes() {
                continue;
            }

            let is_favorite = store.is_favorite(&place.place_id).await?;
            destinations.push(DestinationSummary {
                id: place.place_id,
                name: place.name,
                hours: hours_text(place.opening_hours.as_ref()),
                rating: place.rating.unwrap_or(0.0),
                stops_away: Self::stops_away(&stops, &coords),
                walking_minutes,
                is_favorite,
            });
        }

        sort_destinations(&mut destinations);
        Ok(destinations)
    }

    async fn fetch_destination_detail(
        &self,
        destination_id: &str,
        location: &Coordinates,
    ) -> Result<Option<DestinationDetail>> {
        let Some(detail) = self.places.details(destination_id).await? else {
            return Ok(None);
        };

        // Stops are only needed for the "stops away" estimate; a transit
        // outage should not hide the detail view.
        let stops = match self.transit.stops_near(location).await {
            Ok(stops) => stops,
            Err(e) => {
                tracing::warn!("Stop lookup failed for destination detail: {}", e);
                Vec::new()
            }
        };

        let coords = detail
            .geometry
            .as_ref()
            .and_then(|g| Coordinates::new(g.location.lat, g.location.lng).ok());

        let (stops_away, walking_minutes) = match coords {
            Some(dest) => {
                let nearest = stops
                    .iter()
                    .filter_map(Stop::coordinates)
                    .min_by(|a, b| {
                        a.distance_to(&dest)
                            .partial_cmp(&b.distance_to(&dest))
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .unwrap_or(*location);
                (
                    Self::stops_away(&stops, &dest),
                    nearest.walking_minutes_to(&dest),
                )
            }
            None => (1, 1),
        };

        let is_favorite = self.favorites.get()?.is_favorite(&detail.place_id).await?;

        Ok(Some(DestinationDetail {
            summary: DestinationSummary {
                id: detail.place_id.clone(),
                name: detail.name.clone(),
                hours: hours_text(detail.opening_hours.as_ref()),
                rating: detail.rating.unwrap_or(0.0),
                stops_away,
                walking_minutes,
                is_favorite,
            },
            address: detail.formatted_address.clone().unwrap_or_default(),
            phone: detail.formatted_phone_number.clone().unwrap_or_default(),
            website: detail.website.clone().unwrap_or_default(),
            description: detail
                .editorial_summary
                .as_ref()
                .and_then(|s| s.overview.clone())
                .unwrap_or_default(),
            reviews: detail
                .reviews
                .iter()
                .map(|r| Review {
                    author: r.author_name.clone(),
                    rating: r.rating,
                    text: r.text.clone(),
                })
                .collect(),
            photos: detail
                .photos
                .iter()
                .map(|p| self.places.photo_url(&p.photo_reference))
                .collect(),
        }))
    }
}

// ---------------------------------------------------------------------------
// Mock source
// ---------------------------------------------------------------------------

/// Fixed seed data with a simulated ETA countdown: every fetch after the
/// first decrements each route's ETA by one minute, floored at 1. Filters
/// and location are accepted but ignored.
pub struct MockDataSource {
    routes: RwLock<MockRoutes>,
    favorites: FavoritesHandle,
}

struct MockRoutes {
    routes: Vec<RouteSummary>,
    primed: bool,
}

struct SeedDestination {
    id: &'static str,
    name: &'static str,
    hours: &'static str,
    rating: f32,
    stops_away: u32,
    walking_minutes: u32,
    address: &'static str,
}

const SEED_DESTINATIONS: &[SeedDestination] = &[
    SeedDestination {
        id: "d1",
        name: "Blue Bottle Coffee",
        hours: "Open until 7:00 PM",
        rating: 4.7,
        stops_away: 2,
        walking_minutes: 3,
        address: "66 Mint Street, San Francisco, CA 94103",
    },
    SeedDestination {
        id: "d2",
        name: "Ferry Building Marketplace",
        hours: "Open until 8:00 PM",
        rating: 4.6,
        stops_away: 3,
        walking_minutes: 5,
        address: "1 Ferry Building, San Francisco, CA 94111",
    },
    SeedDestination {
        id: "d3",
        name: "Trader Joe's",
        hours: "Open until 9:00 PM",
        rating: 4.5,
        stops_away: 1,
        walking_minutes: 4,
        address: "555 9th St, San Francisco, CA 94103",
    },
    SeedDestination {
        id: "d4",
        name: "Sightglass Coffee",
        hours: "Open until 6:00 PM",
        rating: 4.8,
        stops_away: 2,
        walking_minutes: 6,
        address: "270 7th Street, San Francisco, CA 94103",
    },
];

fn seed_routes() -> Vec<RouteSummary> {
    vec![
        RouteSummary {
            id: "1".to_string(),
            route_number: "N".to_string(),
            route_name: "N-Judah".to_string(),
            route_direction: "Outbound to Ocean Beach".to_string(),
            nearest_stop_location: "Powell St & Market St".to_string(),
            eta: "3".to_string(),
            destination_count: 8,
        },
        RouteSummary {
            id: "2".to_string(),
            route_number: "30".to_string(),
            route_name: "Stockton".to_string(),
            route_direction: "Northbound to Marina".to_string(),
            nearest_stop_location: "Stockton St & Sutter St".to_string(),
            eta: "6".to_string(),
            destination_count: 12,
        },
        RouteSummary {
            id: "3".to_string(),
            route_number: "F".to_string(),
            route_name: "Market & Wharves".to_string(),
            route_direction: "Outbound to Fisherman's Wharf".to_string(),
            nearest_stop_location: "Market St & 5th St".to_string(),
            eta: "4".to_string(),
            destination_count: 15,
        },
    ]
}

impl MockDataSource {
    pub fn new(favorites: FavoritesHandle) -> Self {
        MockDataSource {
            routes: RwLock::new(MockRoutes {
                routes: seed_routes(),
                primed: false,
            }),
            favorites,
        }
    }

    /// Mark the seed favorites so a fresh store matches the seed cards.
    pub async fn seed_favorites(store: &dyn FavoriteStore) -> Result<()> {
        store.set_favorite("d1").await?;
        store.set_favorite("d4").await?;
        Ok(())
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_routes(
        &self,
        _location: &Coordinates,
        _filters: &DiscoveryFilters,
    ) -> Result<Vec<RouteSummary>> {
        let mut state = self.routes.write().await;
        if state.primed {
            for route in &mut state.routes {
                route.decrement_eta();
            }
        }
        state.primed = true;
        Ok(state.routes.clone())
    }

    async fn fetch_route_detail(
        &self,
        route_id: &str,
        _location: &Coordinates,
    ) -> Result<Option<RouteDetail>> {
        let state = self.routes.read().await;
        let Some(route) = state.routes.iter().find(|r| r.id == route_id) else {
            return Ok(None);
        };

        let base: u32 = route.eta.parse().unwrap_or(1);
        Ok(Some(RouteDetail {
            route_number: route.route_number.clone(),
            route_name: route.route_name.clone(),
            route_direction: route.route_direction.clone(),
            nearest_stop_location: route.nearest_stop_location.clone(),
            next_arrivals: (0..3).map(|i| (base + i * 10).to_string()).collect(),
        }))
    }

    async fn fetch_destinations(
        &self,
        _route_id: &str,
        _location: &Coordinates,
        _filters: &DiscoveryFilters,
    ) -> Result<Vec<DestinationSummary>> {
        let store = self.favorites.get()?;
        let mut destinations = Vec::with_capacity(SEED_DESTINATIONS.len());

        for seed in SEED_DESTINATIONS {
            destinations.push(DestinationSummary {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                hours: seed.hours.to_string(),
                rating: seed.rating,
                stops_away: seed.stops_away,
                walking_minutes: seed.walking_minutes,
                is_favorite: store.is_favorite(seed.id).await?,
            });
        }

        sort_destinations(&mut destinations);
        Ok(destinations)
    }

    async fn fetch_destination_detail(
        &self,
        destination_id: &str,
        _location: &Coordinates,
    ) -> Result<Option<DestinationDetail>> {
        let Some(seed) = SEED_DESTINATIONS.iter().find(|s| s.id == destination_id) else {
            return Ok(None);
        };

        let phone_suffix: u32 = 1000
            + seed
                .id
                .trim_start_matches('d')
                .parse::<u32>()
                .unwrap_or(0);

        let is_favorite = self.favorites.get()?.is_favorite(seed.id).await?;

        Ok(Some(DestinationDetail {
            summary: DestinationSummary {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                hours: seed.hours.to_string(),
                rating: seed.rating,
                stops_away: seed.stops_away,
                walking_minutes: seed.walking_minutes,
                is_favorite,
            },
            address: seed.address.to_string(),
            phone: format!("(415) 555-{}", phone_suffix),
            website: format!("https://www.example.com/{}", seed.id),
            description: format!(
                "This is a detailed description of {}. It would include information about the business, its history, and what makes it special.",
                seed.name
            ),
            reviews: vec![
                Review {
                    author: "John Doe".to_string(),
                    rating: 5,
                    text: "Great place! Highly recommend.".to_string(),
                },
                Review {
                    author: "Jane Smith".to_string(),
                    rating: 4,
                    text: "Very nice experience, would visit again.".to_string(),
                },
            ],
            photos: vec![
                "https://via.placeholder.com/400x300?text=Photo+1".to_string(),
                "https://via.placeholder.com/400x300?text=Photo+2".to_string(),
            ],
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::MemoryFavoriteStore;
    use crate::services::transit::Arrival;
    use std::sync::Arc;
    use time::macros::datetime;

    fn test_handle() -> FavoritesHandle {
        let handle = FavoritesHandle::new();
        handle
            .initialize(Arc::new(MemoryFavoriteStore::new()))
            .unwrap();
        handle
    }

    fn test_location() -> Coordinates {
        Coordinates::new(37.7879, -122.4075).unwrap()
    }

    #[tokio::test]
    async fn mock_routes_match_seed_on_first_fetch() {
        let source = MockDataSource::new(test_handle());
        let routes = source
            .fetch_routes(&test_location(), &DiscoveryFilters::default())
            .await
            .unwrap();

        assert_eq!(routes.len(), 3);
        assert_eq!(routes[0].route_name, "N-Judah");
        assert_eq!(routes[0].eta, "3");
        assert_eq!(routes[2].destination_count, 15);
    }

    #[tokio::test]
    async fn mock_etas_count_down_and_floor_at_one() {
        let source = MockDataSource::new(test_handle());
        let filters = DiscoveryFilters::default();
        let location = test_location();

        source.fetch_routes(&location, &filters).await.unwrap();
        let second = source.fetch_routes(&location, &filters).await.unwrap();
        assert_eq!(second[0].eta, "2");
        assert_eq!(second[1].eta, "5");

        // Far more fetches than the smallest seed ETA
        let mut last = second;
        for _ in 0..10 {
            last = source.fetch_routes(&location, &filters).await.unwrap();
        }
        assert!(last.iter().all(|r| r.eta == "1"));
    }

    #[tokio::test]
    async fn mock_route_detail_spaces_arrivals_ten_minutes_apart() {
        let source = MockDataSource::new(test_handle());
        let detail = source
            .fetch_route_detail("1", &test_location())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.route_number, "N");
        assert_eq!(detail.next_arrivals, vec!["3", "13", "23"]);

        assert!(source
            .fetch_route_detail("99", &test_location())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn mock_destinations_sort_favorites_first() {
        let handle = test_handle();
        MockDataSource::seed_favorites(handle.get().unwrap().as_ref())
            .await
            .unwrap();
        let source = MockDataSource::new(handle);

        let destinations = source
            .fetch_destinations("1", &test_location(), &DiscoveryFilters::default())
            .await
            .unwrap();

        let ids: Vec<&str> = destinations.iter().map(|d| d.id.as_str()).collect();
        // d1 and d4 are favorites; d1 walks shorter. d3 walks shorter than d2.
        assert_eq!(ids, vec!["d1", "d4", "d3", "d2"]);
    }

    #[tokio::test]
    async fn mock_detail_carries_contact_fields() {
        let source = MockDataSource::new(test_handle());
        let detail = source
            .fetch_destination_detail("d2", &test_location())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.summary.name, "Ferry Building Marketplace");
        assert_eq!(detail.phone, "(415) 555-1002");
        assert_eq!(detail.address, "1 Ferry Building, San Francisco, CA 94111");
        assert_eq!(detail.reviews.len(), 2);
        assert_eq!(detail.photos.len(), 2);

        assert!(source
            .fetch_destination_detail("d9", &test_location())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn mock_destinations_fail_without_initialized_store() {
        let source = MockDataSource::new(FavoritesHandle::new());
        let result = source
            .fetch_destinations("1", &test_location(), &DiscoveryFilters::default())
            .await;
        assert!(matches!(
            result,
            Err(crate::error::AppError::Uninitialized(_))
        ));
    }

    fn arrival(line: &str, name: &str, direction: &str, at: &str) -> Arrival {
        Arrival {
            line_ref: Some(line.to_string()),
            line_name: name.to_string(),
            direction: Some(direction.to_string()),
            expected_arrival_time: at.to_string(),
            vehicle_number: None,
        }
    }

    fn stop(code: &str, name: &str) -> Stop {
        Stop {
            stop_code: code.to_string(),
            stop_name: name.to_string(),
            latitude: 37.7844,
            longitude: -122.4080,
        }
    }

    #[test]
    fn live_grouping_keeps_soonest_arrival_per_line() {
        let grouped = vec![StopArrivals {
            stop: stop("15553", "Powell St & Market St"),
            arrivals: vec![
                arrival("N", "N-Judah", "Outbound to Ocean Beach", "2024-03-01T18:13:00Z"),
                arrival("N", "N-Judah", "Outbound to Ocean Beach", "2024-03-01T18:03:00Z"),
                arrival("30", "Stockton", "Northbound to Marina", "2024-03-01T18:06:00Z"),
            ],
        }];

        let now = datetime!(2024-03-01 18:00:00 UTC);
        let builds = TransitDataSource::build_routes(&grouped, now);

        assert_eq!(builds.len(), 2);
        assert_eq!(builds[0].id, "N@15553");
        assert_eq!(builds[0].eta_minutes, Some(3));
        assert_eq!(builds[1].id, "30@15553");
        assert_eq!(builds[1].eta_minutes, Some(6));
    }

    #[test]
    fn live_grouping_separates_same_line_at_different_stops() {
        let grouped = vec![
            StopArrivals {
                stop: stop("15553", "Powell St & Market St"),
                arrivals: vec![arrival(
                    "N",
                    "N-Judah",
                    "Outbound to Ocean Beach",
                    "2024-03-01T18:03:00Z",
                )],
            },
            StopArrivals {
                stop: stop("15554", "Market St & 5th St"),
                arrivals: vec![arrival(
                    "N",
                    "N-Judah",
                    "Inbound to Caltrain",
                    "2024-03-01T18:08:00Z",
                )],
            },
        ];

        let now = datetime!(2024-03-01 18:00:00 UTC);
        let builds = TransitDataSource::build_routes(&grouped, now);
        assert_eq!(builds.len(), 2);
        assert_eq!(builds[0].id, "N@15553");
        assert_eq!(builds[1].id, "N@15554");
    }

    #[test]
    fn eta_string_marks_unknown_arrivals() {
        assert_eq!(TransitDataSource::eta_string(Some(4)), "4");
        assert_eq!(TransitDataSource::eta_string(None), ETA_UNKNOWN);
    }

    #[test]
    fn stops_away_ranks_nearest_stop() {
        let stops = vec![
            Stop {
                stop_code: "1".to_string(),
                stop_name: "Far".to_string(),
                latitude: 37.80,
                longitude: -122.40,
            },
            Stop {
                stop_code: "2".to_string(),
                stop_name: "Near".to_string(),
                latitude: 37.7845,
                longitude: -122.4081,
            },
        ];
        let destination = Coordinates::new(37.7844, -122.4080).unwrap();
        assert_eq!(TransitDataSource::stops_away(&stops, &destination), 2);
        assert_eq!(TransitDataSource::stops_away(&[], &destination), 1);
    }
}
