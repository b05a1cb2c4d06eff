use thiserror::Error;

/// Service layer errors - combines all error types
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Casbin error: {0}")]
    CasbinError(#[from] casbin::Error),

    #[error(transparent)]
    DatabaseError(#[from] apiary_db::error::DbError),

    #[error("Not authenticated")]
    NotAuthenticated,

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Diesel error: {0}")]
    DieselError(#[from] diesel::result::Error),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
