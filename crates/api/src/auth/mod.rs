//! Admin authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and verification of the admin password.
//! - [`token`] -- opaque session token generation and hashing.
//! - [`session`] -- the in-process store of live admin sessions.

pub mod password;
pub mod session;
pub mod token;
