//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod activity_repo;
pub mod company_repo;
pub mod document_repo;
pub mod photo_repo;
pub mod project_repo;

pub use activity_repo::ActivityRepo;
pub use company_repo::CompanyRepo;
pub use document_repo::DocumentRepo;
pub use photo_repo::PhotoRepo;
pub use project_repo::ProjectRepo;
