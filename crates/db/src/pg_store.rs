//! [`ContentStore`] backed by Postgres.

use async_trait::async_trait;
use clubsite_core::types::{new_record_id, RecordId};

use crate::entity::Entity;
use crate::error::StoreError;
use crate::models::event::Event;
use crate::models::gallery_item::GalleryItem;
use crate::models::project::Project;
use crate::models::team_member::TeamMember;
use crate::repositories::{EventRepo, GalleryItemRepo, ProjectRepo, TeamMemberRepo};
use crate::store::{ContentStore, EntityStore};
use crate::DbPool;

/// Postgres backend. Cheap to clone (the pool is reference counted).
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// Route the generic store contract to an entity's repository.
macro_rules! delegate_to_repo {
    ($entity:ty, $repo:ty) => {
        #[async_trait]
        impl EntityStore<$entity> for PgStore {
            async fn list(
                &self,
                filter: &<$entity as Entity>::Filter,
            ) -> Result<Vec<$entity>, StoreError> {
                Ok(<$repo>::list(&self.pool, filter).await?)
            }

            async fn find_by_id(&self, id: RecordId) -> Result<Option<$entity>, StoreError> {
                Ok(<$repo>::find_by_id(&self.pool, id).await?)
            }

            async fn create(
                &self,
                input: <$entity as Entity>::Create,
            ) -> Result<$entity, StoreError> {
                Ok(<$repo>::create(&self.pool, new_record_id(), &input).await?)
            }

            async fn update(
                &self,
                id: RecordId,
                input: <$entity as Entity>::Update,
            ) -> Result<Option<$entity>, StoreError> {
                Ok(<$repo>::update(&self.pool, id, &input).await?)
            }

            async fn delete(&self, id: RecordId) -> Result<bool, StoreError> {
                Ok(<$repo>::delete(&self.pool, id).await?)
            }
        }
    };
}

delegate_to_repo!(Event, EventRepo);
delegate_to_repo!(TeamMember, TeamMemberRepo);
delegate_to_repo!(GalleryItem, GalleryItemRepo);
delegate_to_repo!(Project, ProjectRepo);

#[async_trait]
impl ContentStore for PgStore {
    fn backend_name(&self) -> &'static str {
        "postgres"
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(crate::health_check(&self.pool).await?)
    }
}
