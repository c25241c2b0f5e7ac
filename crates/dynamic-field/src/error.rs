use thiserror::Error;

/// Schema or widget configuration that cannot be resolved.
///
/// Always fatal: composition is aborted and no partial output is produced.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("unknown widget: {0}")]
    UnknownWidget(String),

    #[error("widget {widget}: unknown field id {field}")]
    UnknownField { widget: String, field: String },

    #[error("widget {widget}: invalid schema: {reason}")]
    InvalidSchema { widget: String, reason: String },

    #[error("unknown condition operator: {0}")]
    UnknownCondition(String),

    #[error("failed to read schema: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Settings(#[from] toml::de::Error),
}

/// Errors that abort a compose request.
#[derive(Error, Debug)]
pub enum ComposeError {
    /// Missing or malformed request input, a 4xx for the caller.
    #[error("{0}")]
    ClientInput(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl ComposeError {
    pub fn client(message: impl Into<String>) -> Self {
        ComposeError::ClientInput(message.into())
    }

    /// HTTP status equivalent.
    pub fn status_code(&self) -> u16 {
        match self {
            ComposeError::ClientInput(_) => 400,
            ComposeError::Configuration(_) => 500,
        }
    }
}
