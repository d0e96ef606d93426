//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - For mutable entities, a `Deserialize` update DTO (all `Option` fields)

pub mod company;
pub mod document;
pub mod photo;
pub mod project;
