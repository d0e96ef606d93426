//! Repository for the `photos` table.
//!
//! Same immutability contract as documents: create and read only.

use sqlx::PgPool;
use trakta_core::types::DbId;

use crate::models::photo::{CreatePhoto, Photo};

const COLUMNS: &str = "id, project_id, category, created_at";

/// Provides create/read operations for photos.
pub struct PhotoRepo;

impl PhotoRepo {
    /// Insert a new photo record for a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreatePhoto,
    ) -> Result<Photo, sqlx::Error> {
        let query = format!(
            "INSERT INTO photos (project_id, category, created_at)
             VALUES ($1, $2, COALESCE($3, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Photo>(&query)
            .bind(project_id)
            .bind(&input.category)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a photo by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Photo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM photos WHERE id = $1");
        sqlx::query_as::<_, Photo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's photos, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Photo>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM photos WHERE project_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Photo>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
