use thiserror::Error;

/// Errors shared by every layer.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Server wiring is incomplete, e.g. a depot value was never injected.
    #[error("Invariant violation: {0}")]
    InvariantViolation(&'static str),
}
