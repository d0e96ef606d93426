//! Project entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trakta_core::cache::Cached;
use trakta_core::lifecycle::CompanyAssignment;
use trakta_core::types::{DbId, Timestamp};

use crate::models::company::Company;

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
    pub id: DbId,
    pub name: String,
    /// The billed company. Nullable only for legacy rows; the lifecycle
    /// guard assigns it on every new write.
    pub company_id: Option<DbId>,
    /// The performing company, if different from the billed one.
    pub subcontractor_id: Option<DbId>,
    pub area_sqm: f64,
    /// Lazily backfilled cache of the derived first-activity timestamp.
    /// Never a source of truth; see [`Project::started_at_cache`].
    pub started_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// `started_at` with its cache semantics made explicit.
    pub fn started_at_cache(&self) -> Cached<Timestamp> {
        Cached::from_option(self.started_at)
    }

    pub fn company_assignment(&self) -> CompanyAssignment {
        CompanyAssignment {
            company_id: self.company_id,
            subcontractor_id: self.subcontractor_id,
        }
    }
}

/// DTO for creating a new project.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub company_id: Option<DbId>,
    pub subcontractor_id: Option<DbId>,
    /// Defaults to 0 if omitted.
    pub area_sqm: Option<f64>,
}

/// DTO for updating an existing project. All fields are optional; omitted
/// fields keep their current value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub company_id: Option<DbId>,
    pub subcontractor_id: Option<DbId>,
    pub area_sqm: Option<f64>,
}

/// A project with its company references fully populated, so downstream
/// attribution can run without further lookups.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithCompanies {
    pub project: Project,
    pub company: Option<Company>,
    pub subcontractor: Option<Company>,
    /// The `company`'s parent main contractor, when legacy data left a
    /// subcontractor in the `company` field.
    pub company_parent: Option<Company>,
    /// The `subcontractor`'s parent main contractor, if recorded.
    pub subcontractor_parent: Option<Company>,
}
