//! The error type for the tier ladder. Most operations here "fail quiet" (an
//! unknown id is a no-op, not an error) so this list stays short.

use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Building a model failed, generally because a required field was left
    /// unset.
    #[error("error building object {0}")]
    BuilderFailed(String),
    /// A tier with this id already lives in the ladder
    #[error("a tier with id {0} already exists")]
    DuplicateTier(String),
    /// A form failed validation
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),
}

pub type Result<T> = std::result::Result<T, Error>;
