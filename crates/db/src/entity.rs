//! The shape every content record shares.
//!
//! Postgres repositories express filtering, ordering and patching in SQL.
//! The JSON backend has no query engine, so it relies on the in-process
//! equivalents defined here; the two must agree.

use std::cmp::Ordering;

use chrono::NaiveDate;
use clubsite_core::error::CoreError;
use clubsite_core::types::{RecordId, Timestamp};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Normalize an incoming payload, rejecting it if a field is invalid.
pub trait Validate: Sized {
    fn validate(self) -> Result<Self, CoreError>;
}

/// A flat content record (event, team member, gallery item, project).
pub trait Entity: Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static {
    /// Human-readable name used in error messages.
    const NAME: &'static str;
    /// Table name in Postgres and file stem in the JSON backend.
    const COLLECTION: &'static str;

    type Create: Validate + DeserializeOwned + Send + Sync + 'static;
    type Update: Validate + DeserializeOwned + Send + Sync + 'static;
    type Filter: DeserializeOwned + Default + Send + Sync + 'static;

    fn id(&self) -> RecordId;

    /// Build a new record from a validated create payload.
    fn from_create(id: RecordId, now: Timestamp, input: Self::Create) -> Self;

    /// Apply a validated patch. Absent fields are left untouched.
    fn apply_update(&mut self, input: Self::Update, now: Timestamp);

    fn matches(&self, filter: &Self::Filter, today: NaiveDate) -> bool;

    /// Display order used by list endpoints.
    fn list_order(&self, other: &Self) -> Ordering;
}
