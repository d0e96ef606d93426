use trakta_core::error::CoreError;

/// Error type for repository operations that mix SQL access with domain
/// validation (the guarded project write path and billing selection).
///
/// Plain CRUD methods keep returning `sqlx::Error` directly.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}
