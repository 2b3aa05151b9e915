use nextstop::auth::AuthClient;
use nextstop::favorites::{FavoritesHandle, MemoryFavoriteStore};
use nextstop::models::Coordinates;
use nextstop::scheduler::RefreshScheduler;
use nextstop::services::data_source::{DataSource, MockDataSource};
use nextstop::services::geocoding::GeocodingClient;
use nextstop::services::locator::{FixedPositionProvider, LocationResolver};
use nextstop::AppState;
use std::sync::Arc;
use std::time::Duration;

/// Favorites handle over a fresh in-memory store with the seed favorites
/// (d1, d4) marked.
#[allow(dead_code)]
pub async fn seeded_favorites() -> FavoritesHandle {
    let handle = FavoritesHandle::new();
    handle
        .initialize(Arc::new(MemoryFavoriteStore::new()))
        .expect("store initializes once");
    MockDataSource::seed_favorites(handle.get().unwrap().as_ref())
        .await
        .expect("seeding favorites succeeds");
    handle
}

#[allow(dead_code)]
pub async fn setup_test_state(auth: Option<AuthClient>) -> Arc<AppState> {
    let favorites = seeded_favorites().await;
    let source: Arc<dyn DataSource> = Arc::new(MockDataSource::new(favorites.clone()));

    let provider = FixedPositionProvider::new(Coordinates::new(37.7879, -122.4075).unwrap());
    let resolver = LocationResolver::new(
        Some(Arc::new(provider)),
        GeocodingClient::new("test-key".to_string()),
        Duration::from_secs(15),
    );

    let scheduler = RefreshScheduler::new(source.clone(), Duration::from_secs(60));

    Arc::new(AppState {
        resolver,
        scheduler,
        source,
        favorites,
        auth,
    })
}

/// App over the mock data source with no auth provider, routes unnested.
#[allow(dead_code)]
pub async fn setup_test_app() -> axum::Router {
    nextstop::routes::create_router(setup_test_state(None).await)
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok()
}
