//! Configuration error types.

/// Result type alias for config operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read a config file.
    #[error("failed to read config file '{path}': {source}")]
    ReadFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to write a config file.
    #[error("failed to write config file '{path}': {source}")]
    WriteFile {
        path: String,
        source: std::io::Error,
    },

    /// Failed to parse TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Failed to serialize config.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Missing required field.
    #[error("missing required field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// An exclusion glob did not compile.
    #[error("invalid exclusion pattern '{pattern}': {message}")]
    InvalidGlobPattern { pattern: String, message: String },

    /// A configured route is malformed or collides with another route.
    #[error("invalid route for {field}: '{value}' ({reason})")]
    InvalidRoute {
        field: String,
        value: String,
        reason: String,
    },

    /// A configured route segment contains characters outside `[A-Za-z0-9_-]`.
    #[error("invalid path segment for {field}: '{value}'")]
    InvalidSegment { field: String, value: String },

    /// Other error.
    #[error("{0}")]
    Other(String),
}
