//! Repository for the `documents` table.
//!
//! Documents are immutable: no update or upsert methods exist, and
//! `created_at` is written once at insert.

use sqlx::PgPool;
use trakta_core::types::DbId;

use crate::models::document::{CreateDocument, Document};

const COLUMNS: &str = "id, project_id, doc_type, created_at";

/// Provides create/read operations for documents.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new document for a project, returning the created row.
    pub async fn create(
        pool: &PgPool,
        project_id: DbId,
        input: &CreateDocument,
    ) -> Result<Document, sqlx::Error> {
        let query = format!(
            "INSERT INTO documents (project_id, doc_type, created_at)
             VALUES ($1, $2, COALESCE($3, NOW()))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Document>(&query)
            .bind(project_id)
            .bind(&input.doc_type)
            .bind(input.created_at)
            .fetch_one(pool)
            .await
    }

    /// Find a document by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Document>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM documents WHERE id = $1");
        sqlx::query_as::<_, Document>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a project's documents, oldest first.
    pub async fn list_by_project(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Vec<Document>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM documents WHERE project_id = $1 ORDER BY created_at, id");
        sqlx::query_as::<_, Document>(&query)
            .bind(project_id)
            .fetch_all(pool)
            .await
    }
}
