//! Content model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` record struct matching the database row
//!   (also the on-disk shape of the JSON backend)
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A `Deserialize` filter built from list query parameters
//! - Its [`Entity`](crate::entity::Entity) implementation

pub mod event;
pub mod gallery_item;
pub mod project;
pub mod team_member;

use serde::{Deserialize, Deserializer};

/// Deserialize a patch field where an explicit `null` differs from absence.
///
/// Pair with `#[serde(default)]`: a missing key yields `None`, `null` yields
/// `Some(None)`.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
