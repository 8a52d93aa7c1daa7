//! Generic CRUD handlers shared by every content collection.
//!
//! Each function is instantiated per entity in the route table, e.g.
//! `get(content::list::<Event>)`. Reads are public; writes take an
//! [`AdminSession`].

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use clubsite_core::error::CoreError;
use clubsite_core::types::RecordId;
use clubsite_db::entity::{Entity, Validate};
use clubsite_db::{ContentStore, EntityStore};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::{DataResponse, SuccessResponse};
use crate::state::AppState;

fn not_found<E: Entity>(id: RecordId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: E::NAME,
        id,
    })
}

/// GET /api/{collection}
pub async fn list<E>(
    State(state): State<AppState>,
    Query(filter): Query<E::Filter>,
) -> AppResult<Json<DataResponse<Vec<E>>>>
where
    E: Entity,
    dyn ContentStore: EntityStore<E>,
{
    let records = <dyn ContentStore as EntityStore<E>>::list(state.store.as_ref(), &filter).await?;
    Ok(Json(DataResponse::new(records)))
}

/// GET /api/{collection}/{id}
pub async fn get_by_id<E>(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<DataResponse<E>>>
where
    E: Entity,
    dyn ContentStore: EntityStore<E>,
{
    let record = <dyn ContentStore as EntityStore<E>>::find_by_id(state.store.as_ref(), id)
        .await?
        .ok_or_else(|| not_found::<E>(id))?;
    Ok(Json(DataResponse::new(record)))
}

/// POST /api/admin/{collection}
pub async fn create<E>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Json(input): Json<E::Create>,
) -> AppResult<(StatusCode, Json<DataResponse<E>>)>
where
    E: Entity,
    dyn ContentStore: EntityStore<E>,
{
    let input = input.validate()?;
    let record = <dyn ContentStore as EntityStore<E>>::create(state.store.as_ref(), input).await?;
    tracing::info!(entity = E::NAME, id = %record.id(), "Content record created");
    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}

/// PUT /api/admin/{collection}/{id}
pub async fn update<E>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Json(input): Json<E::Update>,
) -> AppResult<Json<DataResponse<E>>>
where
    E: Entity,
    dyn ContentStore: EntityStore<E>,
{
    let input = input.validate()?;
    let record = <dyn ContentStore as EntityStore<E>>::update(state.store.as_ref(), id, input)
        .await?
        .ok_or_else(|| not_found::<E>(id))?;
    tracing::info!(entity = E::NAME, %id, "Content record updated");
    Ok(Json(DataResponse::new(record)))
}

/// DELETE /api/admin/{collection}/{id}
pub async fn delete<E>(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<SuccessResponse>>
where
    E: Entity,
    dyn ContentStore: EntityStore<E>,
{
    let deleted = <dyn ContentStore as EntityStore<E>>::delete(state.store.as_ref(), id).await?;
    if !deleted {
        return Err(not_found::<E>(id));
    }
    tracing::info!(entity = E::NAME, %id, "Content record deleted");
    Ok(Json(SuccessResponse::ok()))
}
