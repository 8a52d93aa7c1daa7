//! Request extractors guarding the admin routes.
//!
//! - [`auth::AdminSession`] -- requires a live admin session token.

pub mod auth;
