use videostore_core::error::CoreError;

/// Failure of a repository operation that enforces a domain rule.
///
/// Plain CRUD methods return `sqlx::Error` directly. Operations that check
/// business rules inside a transaction (the rental lifecycle, guarded
/// deletes, inventory-preserving updates) can also fail with a [`CoreError`];
/// in that case the transaction has already been rolled back.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}
