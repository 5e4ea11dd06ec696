use crate::validate::ValidationErrors;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur when importing, storing, or deriving character data.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The character data violates one or more sheet invariants.
    #[error("invalid character sheet: {0}")]
    Validation(ValidationErrors),

    /// No stored character matches the query.
    #[error("could not find a character to match `{0}`")]
    CharacterNotFound(String),

    /// The user has characters but none is active.
    #[error("no character is active; import a new character or switch to an existing one")]
    NoActiveCharacter,

    /// The sheet identifier is already present in the roster.
    #[error("sheet '{0}' has already been imported")]
    AlreadyImported(String),

    /// A URL did not match the published-sheet template.
    #[error("not a link to a published-to-web Google Sheet: {0}")]
    InvalidSheetUrl(String),

    /// STR + SIZ is beyond the damage bonus table.
    #[error("STR + SIZ of {0} is beyond the damage bonus table")]
    DamageTableExceeded(u32),

    /// Reading or writing the store failed.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The store contents could not be (de)serialized.
    #[error("store format error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ValidationErrors> for CoreError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
