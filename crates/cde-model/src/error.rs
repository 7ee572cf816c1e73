use thiserror::Error;

/// Schema consistency failures.
///
/// Raised when a registry lookup uses an identifier outside the frozen
/// schema, or when a built-in table disagrees with the registry. Either case
/// means the tables and the registry have drifted apart, so a batch that
/// hits one of these must stop.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("unknown canonical slot: {0}")]
    UnknownSlot(String),

    #[error("unknown modifier axis: {0}")]
    UnknownAxis(String),

    #[error("unknown value '{value}' for modifier axis {axis}")]
    UnknownAxisValue { axis: String, value: String },

    #[error("unknown concept group: {0}")]
    UnknownGroup(String),

    #[error("duplicate definition for {0}")]
    DuplicateDefinition(String),

    #[error("no definition registered for canonical slot {0}")]
    MissingDefinition(String),

    #[error("{table} entry '{entry}' is not a clinically defined combination: {reason}")]
    UndefinedCombination {
        table: String,
        entry: String,
        reason: String,
    },

    #[error("invalid pattern family {family}: {message}")]
    InvalidPattern { family: String, message: String },
}

/// A source variable that is missing a required identity field.
///
/// Fatal for that record only; the rest of the batch is still resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error, serde::Serialize, serde::Deserialize)]
#[error("malformed source variable #{index} ('{dataset}'/'{name}'): {reason}")]
pub struct MalformedInputError {
    /// Position of the record in its batch.
    pub index: usize,
    pub dataset: String,
    pub name: String,
    pub reason: String,
}
