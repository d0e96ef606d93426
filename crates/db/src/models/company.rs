//! Company entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use trakta_core::hierarchy::{CompanyGraph, CompanyNode, CompanyRef};
use trakta_core::types::{DbId, Timestamp};
use uuid::Uuid;

/// Role of a company in the fixed two-level hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "company_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum CompanyType {
    MainContractor,
    Subcontractor,
}

/// A company row from the `companies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Company {
    pub id: DbId,
    /// Opaque stable identifier exposed to external systems.
    pub external_id: Uuid,
    pub name: String,
    pub company_type: CompanyType,
    /// Meaningful only for subcontractors (enforced by a DB check).
    pub parent_company_id: Option<DbId>,
    pub billing_price_per_sqm: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Company {
    pub fn to_ref(&self) -> CompanyRef {
        CompanyRef {
            id: self.id,
            external_id: self.external_id,
            name: self.name.clone(),
            price_per_sqm: self.billing_price_per_sqm,
        }
    }
}

/// DTO for creating a new company.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompany {
    pub name: String,
    pub company_type: CompanyType,
    pub parent_company_id: Option<DbId>,
    /// Defaults to 0 if omitted.
    pub billing_price_per_sqm: Option<f64>,
}

/// DTO for updating an existing company. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCompany {
    pub name: Option<String>,
    pub parent_company_id: Option<DbId>,
    pub billing_price_per_sqm: Option<f64>,
}

/// Build the read-only hierarchy graph from a set of loaded rows.
///
/// Parent links pointing at companies outside `rows` (or at non-main
/// contractors, which legacy data can contain) are treated as absent; the
/// resolver's fallback chain handles those cases downstream.
pub fn build_graph(rows: &[Company]) -> CompanyGraph {
    let nodes = rows.iter().map(|row| match row.company_type {
        CompanyType::MainContractor => CompanyNode::MainContractor(row.to_ref()),
        CompanyType::Subcontractor => {
            let parent = row
                .parent_company_id
                .and_then(|pid| rows.iter().find(|r| r.id == pid))
                .filter(|p| p.company_type == CompanyType::MainContractor)
                .map(Company::to_ref);
            CompanyNode::Subcontractor {
                company: row.to_ref(),
                parent,
            }
        }
    });
    CompanyGraph::from_nodes(nodes)
}
