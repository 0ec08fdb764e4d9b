use thiserror::Error;

use crate::dataset::StarId;

/// Convenient result alias for the starcarrier library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a star identifier could not be found in the dataset.
    #[error("unknown star id: {id}")]
    UnknownStar { id: StarId },

    /// Raised when a shortest-path engine detects a reachable negative-weight
    /// cycle. No finite distance answer exists in that case.
    #[error("negative-weight cycle detected through star {star}")]
    NegativeCycle { star: StarId },

    /// Raised when a link declares a capacity with no sound flow-network
    /// interpretation (negative or non-finite).
    #[error("invalid capacity {value} on link {from} -> {to}")]
    InvalidCapacity {
        from: StarId,
        to: StarId,
        value: f64,
    },
}
