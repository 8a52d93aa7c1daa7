pub mod admin;
pub mod content;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /events, /team, /gallery, /projects              list (public)
/// /events/{id}, /team/{id}, ...                     get (public)
///
/// /admin/login                                      login (public)
/// /admin/logout                                     logout (session required)
/// /admin/session                                    session check (session required)
/// /admin/{events,team,gallery,projects}             create (session required)
/// /admin/{events,team,gallery,projects}/{id}        update, delete (session required)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(content::router())
        .nest("/admin", admin::router())
}
