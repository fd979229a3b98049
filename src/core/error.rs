//! Error types shared by the connection, configuration and generation layers

use thiserror::Error;

/// Errors that can occur while talking to Odoo or generating project files
#[derive(Error, Debug)]
pub enum BoostError {
    /// Missing or invalid configuration (no config file, unsupported protocol, ...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The remote endpoint rejected the credentials
    #[error("Authentication failed for {username}@{database}")]
    Authentication { username: String, database: String },

    /// The connection was used before `authenticate()` succeeded
    #[error("Not authenticated. Call authenticate() first.")]
    NotAuthenticated,

    /// The remote server reported that a model is not part of the registry
    #[error("Model '{0}' does not exist on the server")]
    ModelNotFound(String),

    /// Any other fault reported by the remote server
    #[error("Remote fault {code}: {message}")]
    Fault { code: i64, message: String },

    /// Transport level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with something that is not a valid XML-RPC response
    #[error("Malformed RPC response: {0}")]
    Protocol(String),

    /// A tool argument could not be parsed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A requested named resource does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BoostError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        BoostError::Config(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        BoostError::InvalidArgument(msg.into())
    }

    /// True when the error means "this model is not installed on the server"
    ///
    /// Handlers for optional models use this to tell expected absence apart
    /// from genuine faults.
    pub fn is_missing_model(&self) -> bool {
        matches!(self, BoostError::ModelNotFound(_))
    }
}

/// Result type alias for odoo-boost operations
pub type BoostResult<T> = Result<T, BoostError>;
