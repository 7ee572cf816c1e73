use thiserror::Error;

use cde_model::{MalformedInputError, SchemaError};

/// Failure to resolve one source variable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// The record is unusable; the rest of a batch continues.
    #[error(transparent)]
    Malformed(#[from] MalformedInputError),

    /// The tables and the registry disagree; the batch must stop.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
