//! Error types for the check engine.

use coc_core::CoreError;

/// Errors that can occur while resolving checks and rolls.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A string is not valid dice or integer notation.
    #[error("could not interpret `{0}` as an integer or dice roll")]
    InvalidExpression(String),

    /// A balance request could not be understood.
    #[error("could not interpret `{0}` as an amount")]
    InvalidAmount(String),

    /// A check name matched no characteristic, skill, or special roll.
    #[error("could not understand `{0}` as a skill, characteristic, or difficulty")]
    UnresolvedCheck(String),

    /// The query held only flags.
    #[error("nothing to check: give a skill, characteristic, or number")]
    EmptyQuery,

    /// An error bubbled up from the character layer.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
