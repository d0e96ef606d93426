//! Document entity model.
//!
//! Documents are immutable once created: there is no update DTO and no
//! update query anywhere. `created_at` is authoritative for the activity
//! timeline and never mutated.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trakta_core::types::{DbId, Timestamp};

/// A document row from the `documents` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Document {
    pub id: DbId,
    pub project_id: DbId,
    pub doc_type: String,
    pub created_at: Timestamp,
}

/// DTO for creating a new document.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDocument {
    pub doc_type: String,
    /// Backdated creation timestamp, used when importing an existing
    /// paper trail. Defaults to now.
    pub created_at: Option<Timestamp>,
}
