//! Controller-level error kinds and their response codes.

use thiserror::Error;

use crate::error::ServiceError;

/// Response codes carried in the `errcode` field of the envelope.
pub mod errcode {
    pub const OK: i32 = 0;
    pub const INVALID: i32 = 400;
    pub const FORBIDDEN: i32 = 401;
    pub const FAILED: i32 = 402;
    pub const DENIED: i32 = 405;
    pub const NOT_LOGGED_IN: i32 = 40011;
}

#[derive(Error, Debug)]
pub enum GroupError {
    /// Missing or empty required parameter.
    #[error("{0}")]
    Validation(&'static str),

    /// Missing or empty parameter on `del` and `up`.
    #[error("{0}")]
    InvalidParam(&'static str),

    #[error("permission denied")]
    NotAdmin,

    #[error("permission denied")]
    DangerDenied,

    #[error("group name already exists")]
    Conflict,

    #[error("{0}")]
    NotFound(&'static str),

    /// A store failure while reading a single group.
    #[error(transparent)]
    Lookup(ServiceError),

    #[error(transparent)]
    Persistence(#[from] ServiceError),

    #[error("please log in")]
    NotAuthenticated,
}

impl GroupError {
    #[must_use]
    pub const fn errcode(&self) -> i32 {
        match self {
            Self::Validation(_) | Self::NotFound(_) | Self::Lookup(_) => errcode::INVALID,
            Self::NotAdmin | Self::Conflict => errcode::FORBIDDEN,
            Self::InvalidParam(_) | Self::Persistence(_) => errcode::FAILED,
            Self::DangerDenied => errcode::DENIED,
            Self::NotAuthenticated => errcode::NOT_LOGGED_IN,
        }
    }
}

pub type GroupResult<T> = std::result::Result<T, GroupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_per_kind() {
        assert_eq!(GroupError::Validation("x").errcode(), 400);
        assert_eq!(GroupError::InvalidParam("x").errcode(), 402);
        assert_eq!(GroupError::NotAdmin.errcode(), 401);
        assert_eq!(GroupError::Conflict.errcode(), 401);
        assert_eq!(GroupError::DangerDenied.errcode(), 405);
        assert_eq!(GroupError::NotFound("x").errcode(), 400);
        assert_eq!(GroupError::NotAuthenticated.errcode(), 40011);
        assert_eq!(
            GroupError::from(ServiceError::NotAuthenticated).errcode(),
            402
        );
        assert_eq!(
            GroupError::Lookup(ServiceError::NotAuthenticated).errcode(),
            400
        );
    }

    #[test]
    fn persistence_passes_store_message_through() {
        let err = GroupError::from(ServiceError::Conflict("duplicate key".to_string()));
        assert_eq!(err.to_string(), "Conflict: duplicate key");
    }
}
