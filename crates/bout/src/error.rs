use storage::error::StorageError;
use thiserror::Error;

use crate::random::RandomError;

pub type Result<T> = std::result::Result<T, RingError>;

#[derive(Error, Debug)]
pub enum RingError {
    #[error("Invalid boxer: {0}")]
    TypeMismatch(String),

    #[error("Ring is full, cannot add more boxers")]
    CapacityExceeded,

    #[error("There must be two boxers to start a fight")]
    InsufficientParticipants,

    #[error("Random draw failed: {0}")]
    Random(#[from] RandomError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
