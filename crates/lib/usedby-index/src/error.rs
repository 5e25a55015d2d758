use thiserror::Error;
use usedby_schema::schema::TypeRefKind;

/// Failure to unwrap a type reference down to a named type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ResolveError {
    #[error("{kind:?} wrapper has no inner type")]
    MissingInnerType { kind: TypeRefKind },

    #[error("Type reference does not name a type")]
    UnnamedType,

    #[error("Type reference is wrapped more than {limit} levels deep")]
    DepthExceeded { limit: usize },
}

/// Error type for building and rendering the reverse index
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("Malformed type reference in `{declaration}`: {source}")]
    MalformedReference {
        declaration: String,
        #[source]
        source: ResolveError,
    },

    #[error("Invalid render configuration: {0}")]
    Config(#[from] toml::de::Error),

    #[error("An IO error occurred: {0}")]
    Io(#[from] std::io::Error),
}

pub type IndexResult<T> = Result<T, IndexError>;
