use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Insufficient energy: have {current}, need {required}")]
    InsufficientEnergy { current: i32, required: i32 },

    #[error("Internal error: {0}")]
    Internal(String),
}
