//! Handlers for a project's activity trail: documents and photos.
//!
//! Both are immutable once created, so the surface is create + list only.
//! Their creation timestamps feed the billing-period derivation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use trakta_core::error::CoreError;
use trakta_core::types::DbId;
use trakta_db::models::document::{CreateDocument, Document};
use trakta_db::models::photo::{CreatePhoto, Photo};
use trakta_db::repositories::{DocumentRepo, PhotoRepo, ProjectRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

async fn ensure_project_exists(state: &AppState, id: DbId) -> AppResult<()> {
    ProjectRepo::find_by_id(&state.pool, id)
        .await?
        .map(|_| ())
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Project",
            id,
        }))
}

/// POST /api/v1/projects/{id}/documents
pub async fn create_document(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreateDocument>,
) -> AppResult<(StatusCode, Json<Document>)> {
    ensure_project_exists(&state, project_id).await?;
    let document = DocumentRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(document)))
}

/// GET /api/v1/projects/{id}/documents
pub async fn list_documents(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Document>>> {
    ensure_project_exists(&state, project_id).await?;
    let documents = DocumentRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(documents))
}

/// POST /api/v1/projects/{id}/photos
pub async fn create_photo(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
    Json(input): Json<CreatePhoto>,
) -> AppResult<(StatusCode, Json<Photo>)> {
    ensure_project_exists(&state, project_id).await?;
    let photo = PhotoRepo::create(&state.pool, project_id, &input).await?;
    Ok((StatusCode::CREATED, Json(photo)))
}

/// GET /api/v1/projects/{id}/photos
pub async fn list_photos(
    State(state): State<AppState>,
    Path(project_id): Path<DbId>,
) -> AppResult<Json<Vec<Photo>>> {
    ensure_project_exists(&state, project_id).await?;
    let photos = PhotoRepo::list_by_project(&state.pool, project_id).await?;
    Ok(Json(photos))
}
