use thiserror::Error;

/// Errors raised by the particle field and the scenes built on it.
///
/// `InvalidConfiguration` is final for the values that produced it: build a new
/// field with corrected parameters. `InvalidInput` only rejects one frame; the
/// field keeps its previous state and the caller can try again next tick.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl FieldError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
