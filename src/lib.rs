// Library exports for testing and reusability

pub mod auth;
pub mod config;
pub mod constants;
pub mod error;
pub mod favorites;
pub mod models;
pub mod routes;
pub mod scheduler;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use favorites::FavoritesHandle;
use scheduler::RefreshScheduler;
use services::data_source::DataSource;
use services::locator::LocationResolver;
use std::sync::Arc;

// App state for sharing across the application
pub struct AppState {
    pub resolver: LocationResolver,
    pub scheduler: RefreshScheduler,
    pub source: Arc<dyn DataSource>,
    pub favorites: FavoritesHandle,
    pub auth: Option<auth::AuthClient>,
}
