//! Error types for atomid-core.

use thiserror::Error;

use crate::validate::ValidationError;

pub type AtomIdResult<T> = Result<T, AtomIdError>;

#[derive(Debug, Error)]
pub enum AtomIdError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("decode error: {0}")]
    Decode(String),
}

impl AtomIdError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_pass_through_unchanged() {
        let err: AtomIdError = ValidationError::IdentityMissing.into();
        assert_eq!(err.to_string(), "You need to create an AtomID first");
        assert_eq!(AtomIdError::decode("short").to_string(), "decode error: short");
    }
}
