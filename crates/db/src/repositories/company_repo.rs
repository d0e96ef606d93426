//! Repository for the `companies` table.

use sqlx::PgPool;
use trakta_core::types::DbId;
use uuid::Uuid;

use crate::models::company::{Company, CompanyType, CreateCompany, UpdateCompany};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, external_id, name, company_type, parent_company_id, \
                       billing_price_per_sqm, created_at, updated_at";

/// Provides CRUD operations for companies.
pub struct CompanyRepo;

impl CompanyRepo {
    /// Insert a new company, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCompany) -> Result<Company, sqlx::Error> {
        let query = format!(
            "INSERT INTO companies (name, company_type, parent_company_id, billing_price_per_sqm)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(&input.name)
            .bind(input.company_type)
            .bind(input.parent_company_id)
            .bind(input.billing_price_per_sqm)
            .fetch_one(pool)
            .await
    }

    /// Find a company by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a company by its opaque external identifier.
    pub async fn find_by_external_id(
        pool: &PgPool,
        external_id: Uuid,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies WHERE external_id = $1");
        sqlx::query_as::<_, Company>(&query)
            .bind(external_id)
            .fetch_optional(pool)
            .await
    }

    /// Bulk lookup by ID. Order of the result is unspecified.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<Company>, sqlx::Error> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let query = format!("SELECT {COLUMNS} FROM companies WHERE id = ANY($1)");
        sqlx::query_as::<_, Company>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// List all companies ordered by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM companies ORDER BY name, id");
        sqlx::query_as::<_, Company>(&query).fetch_all(pool).await
    }

    /// List all main contractors, the seed set for billing sheets.
    pub async fn list_main_contractors(pool: &PgPool) -> Result<Vec<Company>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM companies WHERE company_type = $1 ORDER BY name, id"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(CompanyType::MainContractor)
            .fetch_all(pool)
            .await
    }

    /// Update a company. Only non-`None` fields in `input` are applied.
    /// The role (`company_type`) of a company is fixed at creation.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCompany,
    ) -> Result<Option<Company>, sqlx::Error> {
        let query = format!(
            "UPDATE companies SET
                name = COALESCE($2, name),
                parent_company_id = COALESCE($3, parent_company_id),
                billing_price_per_sqm = COALESCE($4, billing_price_per_sqm),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Company>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.parent_company_id)
            .bind(input.billing_price_per_sqm)
            .fetch_optional(pool)
            .await
    }

    /// Delete a company by ID. Returns `true` if a row was removed.
    /// Fails with a foreign-key violation while projects or subcontractors
    /// still reference it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
