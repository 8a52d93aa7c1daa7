use std::sync::Arc;

use clubsite_db::ContentStore;

use crate::auth::session::SessionStore;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// The storage backend selected at startup.
    pub store: Arc<dyn ContentStore>,
    pub config: Arc<ServerConfig>,
    /// Live admin sessions.
    pub sessions: Arc<SessionStore>,
}
