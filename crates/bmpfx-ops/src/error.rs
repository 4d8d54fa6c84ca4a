//! Error types for filter operations.

use thiserror::Error;

/// Error type for filter operations.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Invalid parameter value, such as an unknown filter selector.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A scratch buffer could not be created.
    #[error("scratch buffer: {0}")]
    Allocation(#[from] bmpfx_core::Error),
}

impl OpsError {
    /// Returns `true` if this error came from a failed allocation.
    pub fn is_allocation_error(&self) -> bool {
        matches!(self, Self::Allocation(e) if e.is_allocation_error())
    }
}

/// Result type for filter operations.
pub type OpsResult<T> = Result<T, OpsError>;
