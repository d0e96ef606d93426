//! Photo entity model.
//!
//! Same immutability contract as documents: create and read only,
//! `created_at` is authoritative.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trakta_core::types::{DbId, Timestamp};

/// A photo row from the `photos` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Photo {
    pub id: DbId,
    pub project_id: DbId,
    pub category: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new photo record.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePhoto {
    pub category: String,
    /// Backdated creation timestamp for imported material. Defaults to now.
    pub created_at: Option<Timestamp>,
}
