//! Error types for code generation.

use thiserror::Error;

/// The main error type for generation runs.
#[derive(Debug, Error)]
pub enum GenError {
    /// Raw column type missing from the engine's alias table.
    #[error("Unsupported column type: '{0}'")]
    UnsupportedType(String),

    /// The host handed over a query that cannot satisfy its declared kind.
    #[error("Contract violation in query '{query}': {message}")]
    ContractViolation { query: String, message: String },

    /// A per-query failure, tagged with the query that raised it.
    #[error("Query '{query}': {source}")]
    InQuery {
        query: String,
        #[source]
        source: Box<GenError>,
    },

    /// Engine name not in the supported set.
    #[error("Unknown engine: '{0}'. Expected: mysql, postgresql, or sqlite")]
    UnknownEngine(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed host request.
    #[error("Request error: {0}")]
    Request(#[from] serde_json::Error),

    /// Failed to render source text.
    #[error("Render error: {0}")]
    Render(#[from] std::fmt::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GenError {
    /// Create a contract violation for the given query.
    pub fn contract(query: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ContractViolation {
            query: query.into(),
            message: message.into(),
        }
    }

    /// Attach the name of the query being generated.
    pub fn in_query(self, query: impl Into<String>) -> Self {
        match self {
            Self::InQuery { .. } => self,
            other => Self::InQuery {
                query: query.into(),
                source: Box::new(other),
            },
        }
    }

    /// The underlying error, with any query tag removed.
    pub fn root(&self) -> &GenError {
        match self {
            Self::InQuery { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for generation.
pub type GenResult<T> = Result<T, GenError>;
