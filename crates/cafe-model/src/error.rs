use cafe_core::{CoreError, Station};
use cafe_kernel::KernelError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    /// A server's role assignment and its resume state disagree.
    #[error("station routing inconsistency at {station}: {reason}")]
    Routing {
        station: Station,
        reason:  &'static str,
    },
}

pub type ModelResult<T> = Result<T, ModelError>;
