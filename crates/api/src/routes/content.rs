//! Public read-only routes for the four content collections.

use axum::routing::get;
use axum::Router;
use clubsite_db::entity::Entity;
use clubsite_db::models::event::Event;
use clubsite_db::models::gallery_item::GalleryItem;
use clubsite_db::models::project::Project;
use clubsite_db::models::team_member::TeamMember;
use clubsite_db::{ContentStore, EntityStore};

use crate::handlers::content;
use crate::state::AppState;

/// URL segment under which each collection is exposed.
pub const EVENTS: &str = "/events";
pub const TEAM: &str = "/team";
pub const GALLERY: &str = "/gallery";
pub const PROJECTS: &str = "/projects";

/// Routes mounted at `/api`.
///
/// ```text
/// GET /{collection}          -> list
/// GET /{collection}/{id}     -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
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
        .route(path, get(content::list::<E>))
        .route(&format!("{path}/{{id}}"), get(content::get_by_id::<E>))
}
