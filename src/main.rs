use axum::{middleware, Router};
use nextstop::auth::{self, AuthClient};
use nextstop::config::{Config, DataSourceKind};
use nextstop::favorites::{FavoriteStore, FavoritesHandle, MemoryFavoriteStore, RedisFavoriteStore};
use nextstop::models::Coordinates;
use nextstop::scheduler::RefreshScheduler;
use nextstop::services::data_source::{DataSource, MockDataSource, TransitDataSource};
use nextstop::services::geocoding::GeocodingClient;
use nextstop::services::locator::{FixedPositionProvider, GeolocationProvider, LocationResolver};
use nextstop::services::places::PlacesClient;
use nextstop::services::transit::TransitClient;
use nextstop::AppState;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "nextstop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting NextStop API server");
    tracing::info!("Configuration loaded successfully");

    // Initialize favorite store: try Redis, fall back to in-memory
    let store: Arc<dyn FavoriteStore> = if let Some(ref redis_url) = config.redis_url {
        tracing::info!("Connecting to Redis favorite store...");
        match RedisFavoriteStore::new(redis_url).await {
            Ok(redis_store) => Arc::new(redis_store),
            Err(e) => {
                tracing::warn!(
                    "Failed to connect to Redis: {}. Falling back to in-memory favorites.",
                    e
                );
                Arc::new(MemoryFavoriteStore::new())
            }
        }
    } else {
        tracing::info!("Redis URL not configured. Using in-memory favorites.");
        Arc::new(MemoryFavoriteStore::new())
    };

    let favorites = FavoritesHandle::new();
    favorites
        .initialize(store)
        .map_err(|e| format!("Failed to initialize favorite store: {}", e))?;

    // Initialize external clients
    let geocoder = match config.geocoding_base_url.clone() {
        Some(base_url) => {
            GeocodingClient::with_base_url(config.google_maps_api_key.clone(), base_url)
        }
        None => GeocodingClient::new(config.google_maps_api_key.clone()),
    };
    let places = match config.places_base_url.clone() {
        Some(base_url) => PlacesClient::with_base_url(config.google_maps_api_key.clone(), base_url),
        None => PlacesClient::new(config.google_maps_api_key.clone()),
    };
    let transit = match config.transit_base_url.clone() {
        Some(base_url) => TransitClient::with_base_url(config.transit_api_key.clone(), base_url),
        None => TransitClient::new(config.transit_api_key.clone()),
    };

    // Position provider for installations with a known location
    let provider: Option<Arc<dyn GeolocationProvider>> = match config.fixed_position {
        Some((lat, lng)) => {
            let coords = Coordinates::new(lat, lng)
                .map_err(|e| format!("Invalid fixed position: {}", e))?;
            tracing::info!("Using fixed position provider at {:?}", coords);
            Some(Arc::new(FixedPositionProvider::new(coords)))
        }
        None => {
            tracing::info!("No position provider configured; location requests fall back");
            None
        }
    };

    let resolver = LocationResolver::new(
        provider,
        geocoder,
        Duration::from_secs(config.geolocation_timeout_secs),
    );

    // Select the data source
    let source: Arc<dyn DataSource> = match config.data_source {
        DataSourceKind::Mock => {
            tracing::info!("Using mock data source");
            MockDataSource::seed_favorites(favorites.get()?.as_ref()).await?;
            Arc::new(MockDataSource::new(favorites.clone()))
        }
        DataSourceKind::Live => {
            tracing::info!("Using live transit data source");
            Arc::new(TransitDataSource::new(transit, places, favorites.clone()))
        }
    };

    let scheduler = RefreshScheduler::new(
        source.clone(),
        Duration::from_secs(config.refresh_interval_secs),
    );

    let auth_client = config.auth_base_url.clone().map(AuthClient::new);
    if auth_client.is_some() {
        tracing::info!("Session verification enabled");
    } else {
        tracing::info!("No auth provider configured; route protection disabled");
    }

    // Create application state
    let state = Arc::new(AppState {
        resolver,
        scheduler,
        source,
        favorites,
        auth: auth_client,
    });

    // Build router with auth, CORS and tracing
    let app = Router::new()
        .nest("/api/v1", nextstop::routes::create_router(state.clone()))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_session,
        ))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
