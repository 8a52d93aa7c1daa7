//! Postgres repositories, one per content table.
//!
//! Optional text columns are patched with the same convention as the DTOs:
//! a NULL parameter keeps the column, an empty string clears it.

pub mod event_repo;
pub mod gallery_item_repo;
pub mod project_repo;
pub mod team_member_repo;

pub use event_repo::EventRepo;
pub use gallery_item_repo::GalleryItemRepo;
pub use project_repo::ProjectRepo;
pub use team_member_repo::TeamMemberRepo;
