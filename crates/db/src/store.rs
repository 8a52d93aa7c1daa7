//! Storage contract shared by every backend.

use async_trait::async_trait;
use clubsite_core::types::RecordId;

use crate::entity::Entity;
use crate::error::StoreError;
use crate::models::event::Event;
use crate::models::gallery_item::GalleryItem;
use crate::models::project::Project;
use crate::models::team_member::TeamMember;

/// Flat CRUD over one entity collection.
///
/// Inputs are expected to be validated already (see
/// [`Validate`](crate::entity::Validate)).
#[async_trait]
pub trait EntityStore<E: Entity>: Send + Sync {
    async fn list(&self, filter: &E::Filter) -> Result<Vec<E>, StoreError>;

    async fn find_by_id(&self, id: RecordId) -> Result<Option<E>, StoreError>;

    async fn create(&self, input: E::Create) -> Result<E, StoreError>;

    /// Returns `None` if no record with `id` exists.
    async fn update(&self, id: RecordId, input: E::Update) -> Result<Option<E>, StoreError>;

    /// Returns `true` if a record was removed.
    async fn delete(&self, id: RecordId) -> Result<bool, StoreError>;
}

/// A complete backend: one store per entity plus liveness reporting.
#[async_trait]
pub trait ContentStore:
    EntityStore<Event> + EntityStore<TeamMember> + EntityStore<GalleryItem> + EntityStore<Project>
{
    /// Short identifier reported by the health endpoint.
    fn backend_name(&self) -> &'static str;

    async fn health_check(&self) -> Result<(), StoreError>;
}
