use crate::parser::Rule;
use pest::error::Error as PestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Pest parsing error: {0}")]
    PestError(#[from] Box<PestError<Rule>>),

    #[error("Expected {expected} rule but found {found}")]
    UnexpectedRule { expected: String, found: String },

    #[error("Missing required element: {0}")]
    MissingElement(String),

    #[error("Type `{name}` is declared more than once")]
    DuplicateType { name: String },

    #[error("Type `{name}` has kind {kind} which cannot be declared in a type map")]
    UnknownTypeKind { name: String, kind: String },

    #[error("The schema file was not found: {0}")]
    FileNotFound(String),

    #[error("An IO error occurred: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "introspection")]
    #[error("Invalid introspection result: {0}")]
    Json(#[from] serde_json::Error),
}
