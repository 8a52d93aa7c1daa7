//! Admin routes: session management and content mutation.

use axum::routing::{get, post, put};
use axum::Router;
use clubsite_db::entity::Entity;
use clubsite_db::models::event::Event;
use clubsite_db::models::gallery_item::GalleryItem;
use clubsite_db::models::project::Project;
use clubsite_db::models::team_member::TeamMember;
use clubsite_db::{ContentStore, EntityStore};

use super::content::{EVENTS, GALLERY, PROJECTS, TEAM};
use crate::handlers::{admin, content};
use crate::state::AppState;

/// Routes mounted at `/api/admin`.
///
/// ```text
/// POST   /login                 -> login
/// POST   /logout                -> logout
/// GET    /session               -> session
/// POST   /{collection}          -> create
/// PUT    /{collection}/{id}     -> update
/// DELETE /{collection}/{id}     -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(admin::login))
        .route("/logout", post(admin::logout))
        .route("/session", get(admin::session))
        .merge(collection::<Event>(EVENTS))
        .merge(collection::<TeamMember>(TEAM))
        .merge(collection::<GalleryItem>(GALLERY))
        .merge(collection::<Project>(PROJECTS))
}

fn collection<E>(path: &str) -> Router<AppState>
where
    E: Entity,
    dyn ContentStore: EntityStore<E>,
{
    Router::new()
        .route(path, post(content::create::<E>))
        .route(
            &format!("{path}/{{id}}"),
            put(content::update::<E>).delete(content::delete::<E>),
        )
}
