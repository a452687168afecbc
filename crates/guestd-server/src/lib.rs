// ABOUTME: HTTP server for guestd, exposing the guest CRUD REST API.
// ABOUTME: Uses Axum with a shared store handle injected into every handler.

pub mod api;
pub mod app_state;
pub mod config;
pub mod routes;

pub use app_state::{AppState, SharedState};
pub use config::{ConfigError, GuestdConfig};
pub use routes::create_router;
