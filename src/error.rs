use thiserror::Error;

use lateinit_core::{LoweringError, RegistrationError};
use lateinit_interp::RuntimeError;

/// Any failure surfaced by the facade.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("registration failed: {0}")]
    Registration(#[from] RegistrationError),

    #[error("lowering failed: {0}")]
    Lowering(#[from] LoweringError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

pub type Result<T> = std::result::Result<T, Error>;
