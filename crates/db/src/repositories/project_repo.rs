//! Repository for the `projects` table.
//!
//! Creates and updates run the lifecycle guard inside the same transaction
//! as the write: a project must never exist, even transiently, without a
//! resolvable billed company. A guard rejection rolls the whole write back.

use std::collections::HashMap;

use sqlx::{PgPool, Postgres, Transaction};
use trakta_core::lifecycle::{validate_and_assign_company, CompanyAssignment};
use trakta_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::company::{build_graph, Company};
use crate::models::project::{CreateProject, Project, ProjectWithCompanies, UpdateProject};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, name, company_id, subcontractor_id, area_sqm, started_at, created_at, updated_at";

const COMPANY_COLUMNS: &str = "id, external_id, name, company_type, parent_company_id, \
                               billing_price_per_sqm, created_at, updated_at";

/// Provides CRUD operations for projects, plus the billing-specific
/// lookups used by the period selector.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a new project. The billed `company_id` is determined by the
    /// lifecycle guard from the input's company/subcontractor pair; a
    /// guard rejection aborts the insert entirely.
    pub async fn create(pool: &PgPool, input: &CreateProject) -> Result<Project, DbError> {
        let mut tx = pool.begin().await?;

        let patch = CompanyAssignment {
            company_id: input.company_id,
            subcontractor_id: input.subcontractor_id,
        };
        let graph = build_graph(&load_guard_companies(&mut tx, patch).await?);
        let company_id = validate_and_assign_company(patch, CompanyAssignment::default(), &graph)?;

        let query = format!(
            "INSERT INTO projects (name, company_id, subcontractor_id, area_sqm)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.name)
            .bind(company_id)
            .bind(input.subcontractor_id)
            .bind(input.area_sqm)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(project)
    }

    /// Update a project. Only non-`None` fields in `input` are applied,
    /// and the guard is evaluated against the merged view of the current
    /// row and the patch.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProject,
    ) -> Result<Option<Project>, DbError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1 FOR UPDATE");
        let Some(current) = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
        else {
            return Ok(None);
        };

        let patch = CompanyAssignment {
            company_id: input.company_id,
            subcontractor_id: input.subcontractor_id,
        };
        let merged = patch.merged_with(current.company_assignment());
        let graph = build_graph(&load_guard_companies(&mut tx, merged).await?);
        let company_id =
            validate_and_assign_company(patch, current.company_assignment(), &graph)?;

        let query = format!(
            "UPDATE projects SET
                name = COALESCE($2, name),
                company_id = $3,
                subcontractor_id = COALESCE($4, subcontractor_id),
                area_sqm = COALESCE($5, area_sqm),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(company_id)
            .bind(input.subcontractor_id)
            .bind(input.area_sqm)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(project))
    }

    /// Find a project by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Bulk load projects with company, subcontractor, and parent company
    /// populated, so downstream attribution needs no further lookups.
    ///
    /// Two bulk queries (projects, then all referenced companies including
    /// parents), stitched in memory. Result order follows `ids`.
    pub async fn find_by_ids_with_companies(
        pool: &PgPool,
        ids: &[DbId],
    ) -> Result<Vec<ProjectWithCompanies>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = ANY($1)");
        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await?;

        let company_ids: Vec<DbId> = projects
            .iter()
            .flat_map(|p| [p.company_id, p.subcontractor_id])
            .flatten()
            .collect();
        let query = format!(
            "SELECT {COMPANY_COLUMNS} FROM companies
             WHERE id = ANY($1)
                OR id IN (SELECT parent_company_id FROM companies
                          WHERE id = ANY($1) AND parent_company_id IS NOT NULL)"
        );
        let companies = sqlx::query_as::<_, Company>(&query)
            .bind(&company_ids)
            .fetch_all(pool)
            .await?;
        let by_id: HashMap<DbId, Company> =
            companies.into_iter().map(|c| (c.id, c)).collect();

        let mut by_project: HashMap<DbId, Project> =
            projects.into_iter().map(|p| (p.id, p)).collect();

        Ok(ids
            .iter()
            .filter_map(|id| by_project.remove(id))
            .map(|project| {
                let company = project.company_id.and_then(|id| by_id.get(&id)).cloned();
                let subcontractor = project
                    .subcontractor_id
                    .and_then(|id| by_id.get(&id))
                    .cloned();
                // Both parent links are carried: legacy rows can hold two
                // distinct subcontractors, and attribution must see the
                // company's parent before the subcontractor's.
                let company_parent = company
                    .as_ref()
                    .and_then(|c| c.parent_company_id)
                    .and_then(|id| by_id.get(&id))
                    .cloned();
                let subcontractor_parent = subcontractor
                    .as_ref()
                    .and_then(|s| s.parent_company_id)
                    .and_then(|id| by_id.get(&id))
                    .cloned();
                ProjectWithCompanies {
                    project,
                    company,
                    subcontractor,
                    company_parent,
                    subcontractor_parent,
                }
            })
            .collect())
    }

    /// Write the derived first-activity timestamp into the `started_at`
    /// cache. The `IS NULL` predicate makes the write idempotent and rules
    /// out retroactive correction of an already backfilled value.
    ///
    /// Returns `true` if a row was written.
    pub async fn backfill_started_at(
        pool: &PgPool,
        id: DbId,
        started_at: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE projects SET started_at = $2 WHERE id = $1 AND started_at IS NULL",
        )
        .bind(id)
        .bind(started_at)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Projects with a non-null stored `started_at`, the legacy fallback
    /// for unbounded queries. The cache may be stale or never backfilled,
    /// so this is documented as a lower-fidelity path.
    pub async fn list_started_by_cache(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM projects WHERE started_at IS NOT NULL ORDER BY started_at, id"
        );
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// Permanently delete a project by ID. Returns `true` if a row was
    /// removed. Documents and photos cascade.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Load the companies the guard needs to evaluate an assignment: the
/// referenced company and subcontractor plus the subcontractor's parent.
async fn load_guard_companies(
    tx: &mut Transaction<'_, Postgres>,
    assignment: CompanyAssignment,
) -> Result<Vec<Company>, sqlx::Error> {
    let ids: Vec<DbId> = [assignment.company_id, assignment.subcontractor_id]
        .into_iter()
        .flatten()
        .collect();
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let query = format!(
        "SELECT {COMPANY_COLUMNS} FROM companies
         WHERE id = ANY($1)
            OR id IN (SELECT parent_company_id FROM companies
                      WHERE id = ANY($1) AND parent_company_id IS NOT NULL)"
    );
    sqlx::query_as::<_, Company>(&query)
        .bind(&ids)
        .fetch_all(&mut **tx)
        .await
}
