use crate::models::{Coordinates, DiscoveryFilters, RouteSummary};
use crate::services::data_source::DataSource;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Displayed on a board whose last fetch failed. Previous routes stay on
/// the board; a later successful fetch clears the message.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load routes. Please try again.";

/// The shared, last-write-wins state of one mounted board.
#[derive(Debug, Clone, Serialize)]
pub struct RouteBoard {
    pub routes: Vec<RouteSummary>,
    pub error: Option<String>,
    /// Completed fetch attempts (successful or not).
    pub refresh_count: u64,
    /// True until the initial fetch settles.
    pub loading: bool,
}

impl Default for RouteBoard {
    fn default() -> Self {
        RouteBoard {
            routes: Vec::new(),
            error: None,
            refresh_count: 0,
            loading: true,
        }
    }
}

struct BoardSession {
    board: Arc<RwLock<RouteBoard>>,
    cancel: CancellationToken,
    location: Coordinates,
    filters: DiscoveryFilters,
}

/// Mounts route boards and keeps them fresh: an initial fetch on mount,
/// then the same fetch every refresh interval until unmount cancels the
/// task. Manual refresh goes through the identical fetch path. Overlapping
/// fetches are neither deduplicated nor serialized — last write wins.
pub struct RefreshScheduler {
    source: Arc<dyn DataSource>,
    interval: Duration,
    sessions: RwLock<HashMap<Uuid, Arc<BoardSession>>>,
}

impl RefreshScheduler {
    pub fn new(source: Arc<dyn DataSource>, interval: Duration) -> Self {
        RefreshScheduler {
            source,
            interval,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Mount a board and start its refresh task. The first timer tick fires
    /// no earlier than one interval after mount, independent of how long
    /// the initial fetch takes.
    pub async fn mount(&self, location: Coordinates, filters: DiscoveryFilters) -> Uuid {
        let id = Uuid::new_v4();
        let session = Arc::new(BoardSession {
            board: Arc::new(RwLock::new(RouteBoard::default())),
            cancel: CancellationToken::new(),
            location,
            filters,
        });

        self.sessions.write().await.insert(id, session.clone());

        let source = self.source.clone();
        let interval = self.interval;
        tokio::spawn(async move {
            let cancel = session.cancel.clone();
            let first_tick = tokio::time::Instant::now() + interval;

            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = refresh_board(source.as_ref(), &session) => {}
            }

            let mut ticker = tokio::time::interval_at(first_tick, interval);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        tokio::select! {
                            _ = cancel.cancelled() => break,
                            _ = refresh_board(source.as_ref(), &session) => {}
                        }
                    }
                }
            }

            tracing::debug!(board = %id, "Refresh task stopped");
        });

        tracing::info!(board = %id, "Mounted route board");
        id
    }

    /// Snapshot of a board's current state.
    pub async fn board(&self, id: &Uuid) -> Option<RouteBoard> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(id)?;
        let board = session.board.read().await.clone();
        Some(board)
    }

    /// The location and filters a board was mounted with.
    pub async fn board_params(&self, id: &Uuid) -> Option<(Coordinates, DiscoveryFilters)> {
        let sessions = self.sessions.read().await;
        sessions.get(id).map(|s| (s.location, s.filters))
    }

    /// User-triggered refresh through the same fetch path as the timer.
    /// Returns the refreshed board, or `None` for an unknown id.
    pub async fn refresh_now(&self, id: &Uuid) -> Option<RouteBoard> {
        let session = {
            let sessions = self.sessions.read().await;
            sessions.get(id).cloned()
        }?;

        refresh_board(self.source.as_ref(), &session).await;
        let board = session.board.read().await.clone();
        Some(board)
    }

    /// Unmount a board: cancel its task and drop its state. Returns whether
    /// the board existed.
    pub async fn unmount(&self, id: &Uuid) -> bool {
        let removed = self.sessions.write().await.remove(id);
        match removed {
            Some(session) => {
                session.cancel.cancel();
                tracing::info!(board = %id, "Unmounted route board");
                true
            }
            None => false,
        }
    }

    pub async fn active_boards(&self) -> usize {
        self.sessions.read().await.len()
    }
}

async fn refresh_board(source: &dyn DataSource, session: &BoardSession) {
    match source
        .fetch_routes(&session.location, &session.filters)
        .await
    {
        Ok(routes) => {
            let mut board = session.board.write().await;
            board.routes = routes;
            board.error = None;
            board.refresh_count += 1;
            board.loading = false;
        }
        Err(e) => {
            tracing::warn!("Route fetch failed: {}", e);
            let mut board = session.board.write().await;
            board.error = Some(FETCH_FAILED_MESSAGE.to_string());
            board.refresh_count += 1;
            board.loading = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, Result};
    use crate::models::{DestinationDetail, DestinationSummary, RouteDetail};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

    /// Counts fetches; optionally fails until told otherwise.
    struct CountingSource {
        fetches: AtomicU64,
        failing: AtomicBool,
    }

    impl CountingSource {
        fn new() -> Self {
            CountingSource {
                fetches: AtomicU64::new(0),
                failing: AtomicBool::new(false),
            }
        }

        fn count(&self) -> u64 {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DataSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch_routes(
            &self,
            _location: &Coordinates,
            _filters: &DiscoveryFilters,
        ) -> Result<Vec<RouteSummary>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            if self.failing.load(Ordering::SeqCst) {
                return Err(AppError::TransitApi("scripted failure".to_string()));
            }
            Ok(vec![])
        }

        async fn fetch_route_detail(
            &self,
            _route_id: &str,
            _location: &Coordinates,
        ) -> Result<Option<RouteDetail>> {
            Ok(None)
        }

        async fn fetch_destinations(
            &self,
            _route_id: &str,
            _location: &Coordinates,
            _filters: &DiscoveryFilters,
        ) -> Result<Vec<DestinationSummary>> {
            Ok(vec![])
        }

        async fn fetch_destination_detail(
            &self,
            _destination_id: &str,
            _location: &Coordinates,
        ) -> Result<Option<DestinationDetail>> {
            Ok(None)
        }
    }

    fn test_location() -> Coordinates {
        Coordinates::new(37.7879, -122.4075).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn initial_fetch_runs_on_mount() {
        let source = Arc::new(CountingSource::new());
        let scheduler = RefreshScheduler::new(source.clone(), Duration::from_secs(60));

        let id = scheduler
            .mount(test_location(), DiscoveryFilters::default())
            .await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        assert_eq!(source.count(), 1);
        let board = scheduler.board(&id).await.unwrap();
        assert!(!board.loading);
        assert_eq!(board.refresh_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn timer_fires_once_per_interval() {
        let source = Arc::new(CountingSource::new());
        let scheduler = RefreshScheduler::new(source.clone(), Duration::from_secs(60));

        scheduler
            .mount(test_location(), DiscoveryFilters::default())
            .await;
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert_eq!(source.count(), 1);

        // No tick before the interval elapses
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(source.count(), 1);

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert_eq!(source.count(), 2);

        tokio::time::sleep(Duration::from_secs(120)).await;
        assert_eq!(source.count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn no_tick_after_unmount() {
        let source = Arc::new(CountingSource::new());
        let scheduler = RefreshScheduler::new(source.clone(), Duration::from_secs(60));

        let id = scheduler
            .mount(test_location(), DiscoveryFilters::default())
            .await;
        tokio::time::sleep(Duration::from_secs(61)).await;
        let before = source.count();
        assert_eq!(before, 2);

        assert!(scheduler.unmount(&id).await);
        tokio::time::sleep(Duration::from_secs(600)).await;
        assert_eq!(source.count(), before);

        assert!(scheduler.board(&id).await.is_none());
        assert!(!scheduler.unmount(&id).await);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_refresh_uses_the_same_fetch_path() {
        let source = Arc::new(CountingSource::new());
        let scheduler = RefreshScheduler::new(source.clone(), Duration::from_secs(60));

        let id = scheduler
            .mount(test_location(), DiscoveryFilters::default())
            .await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        let board = scheduler.refresh_now(&id).await.unwrap();
        assert_eq!(source.count(), 2);
        assert_eq!(board.refresh_count, 2);

        let missing = Uuid::new_v4();
        assert!(scheduler.refresh_now(&missing).await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn failed_fetch_sets_error_and_success_clears_it() {
        let source = Arc::new(CountingSource::new());
        source.failing.store(true, Ordering::SeqCst);
        let scheduler = RefreshScheduler::new(source.clone(), Duration::from_secs(60));

        let id = scheduler
            .mount(test_location(), DiscoveryFilters::default())
            .await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        let board = scheduler.board(&id).await.unwrap();
        assert_eq!(board.error.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert!(!board.loading);

        source.failing.store(false, Ordering::SeqCst);
        let board = scheduler.refresh_now(&id).await.unwrap();
        assert!(board.error.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn board_params_survive_for_detail_lookups() {
        let source = Arc::new(CountingSource::new());
        let scheduler = RefreshScheduler::new(source, Duration::from_secs(60));

        let filters = DiscoveryFilters::default();
        let id = scheduler.mount(test_location(), filters).await;

        let (location, stored) = scheduler.board_params(&id).await.unwrap();
        assert_eq!(location, test_location());
        assert_eq!(stored, filters);
        assert_eq!(scheduler.active_boards().await, 1);
    }
}
