//! Domain primitives shared by the storage and HTTP crates.
//!
//! - [`error`] -- domain error type.
//! - [`types`] -- identifier and timestamp aliases.
//! - [`url`] -- URL validation and normalization helpers.
//! - [`validation`] -- field-level checks applied to incoming content.

pub mod error;
pub mod types;
pub mod url;
pub mod validation;
