//! Engine-level error type.

use edura_core::error::CoreError;

/// Error returned by engine services.
///
/// Domain violations surface as [`CoreError`]; everything else is a storage
/// failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Whether `err` is a Postgres unique violation (23505) on the named
/// constraint or index.
///
/// Used where a constraint backs a business invariant (duplicate active
/// battle) and the violation must surface as a typed conflict instead of a
/// storage failure.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505")
                && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
