//! Queries over the derived activity union of documents and photos.
//!
//! Two query shapes, matching the two phases of billing-period selection:
//! a cheap range-limited candidate scan and an unbounded bulk minimum.
//! Both are single statements over the union; the bulk minimum must never
//! degenerate into one query per candidate.

use sqlx::PgPool;
use trakta_core::types::{DbId, Timestamp};

/// Read-only queries over the documents+photos activity trail.
pub struct ActivityRepo;

impl ActivityRepo {
    /// Projects with at least one document or photo created inside
    /// `[start, end_exclusive)`. A superset of the projects that truly
    /// started in the range; the caller must verify against the unbounded
    /// first activity.
    pub async fn candidate_project_ids(
        pool: &PgPool,
        start: Timestamp,
        end_exclusive: Timestamp,
    ) -> Result<Vec<DbId>, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "SELECT DISTINCT project_id FROM (
                 SELECT project_id FROM documents
                  WHERE created_at >= $1 AND created_at < $2
                 UNION ALL
                 SELECT project_id FROM photos
                  WHERE created_at >= $1 AND created_at < $2
             ) activity",
        )
        .bind(start)
        .bind(end_exclusive)
        .fetch_all(pool)
        .await
    }

    /// True first activity per project, computed over the complete,
    /// unbounded activity set of each given project in one grouped query.
    /// Projects with no activity at all are absent from the result.
    pub async fn first_activity_bulk(
        pool: &PgPool,
        project_ids: &[DbId],
    ) -> Result<Vec<(DbId, Timestamp)>, sqlx::Error> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_as::<_, (DbId, Timestamp)>(
            "SELECT project_id, MIN(created_at) FROM (
                 SELECT project_id, created_at FROM documents WHERE project_id = ANY($1)
                 UNION ALL
                 SELECT project_id, created_at FROM photos WHERE project_id = ANY($1)
             ) activity
             GROUP BY project_id",
        )
        .bind(project_ids)
        .fetch_all(pool)
        .await
    }

    /// True first activity of a single project, `None` if it has neither
    /// documents nor photos.
    pub async fn first_activity(
        pool: &PgPool,
        project_id: DbId,
    ) -> Result<Option<Timestamp>, sqlx::Error> {
        let min: Option<Timestamp> = sqlx::query_scalar(
            "SELECT MIN(created_at) FROM (
                 SELECT created_at FROM documents WHERE project_id = $1
                 UNION ALL
                 SELECT created_at FROM photos WHERE project_id = $1
             ) activity",
        )
        .bind(project_id)
        .fetch_one(pool)
        .await?;
        Ok(min)
    }
}
