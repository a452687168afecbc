// ABOUTME: Shared application state for the guestd HTTP server.
// ABOUTME: Holds the store behind a mutex; constructed once at startup and injected everywhere.

use std::sync::Arc;

use guestd_store::GuestStore;
use tokio::sync::Mutex;

/// Shared application state accessible by all Axum handlers. The store owns
/// a single SQLite connection, so access is serialized through the mutex.
pub struct AppState {
    pub store: Mutex<GuestStore>,
}

/// Type alias for the Arc-wrapped state used with Axum's State extractor.
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Wrap an opened store into shared state.
    pub fn new(store: GuestStore) -> Self {
        Self {
            store: Mutex::new(store),
        }
    }
}
