/// Configuration loading and validation errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    #[error("failed to parse config {path}: {message}")]
    ParseError { path: String, message: String },

    #[error("failed to serialize config: {message}")]
    SerializeError { message: String },

    #[error("invalid value for {field}: {message}")]
    ValidationFailed { field: String, message: String },
}
