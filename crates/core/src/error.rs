use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    /// A check-out referenced a customer or video that does not exist.
    #[error("Customer or Video Does Not Exist")]
    RentalPartyNotFound,

    #[error("Invalid data: missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No more of that video left")]
    OutOfStock,

    #[error("We have all those videos")]
    FullyStocked,

    #[error("Customer already has that video checked out")]
    AlreadyCheckedOut,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
