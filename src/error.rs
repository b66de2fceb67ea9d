use thiserror::Error;

/// Unified error type for minver operations
#[derive(Error, Debug)]
pub enum MinverError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file is invalid: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in minver
pub type Result<T> = std::result::Result<T, MinverError>;

impl MinverError {
    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        MinverError::Repository(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        MinverError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        MinverError::Version(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        MinverError::Tag(msg.into())
    }

    /// Whether the error was raised while validating configuration,
    /// before any repository access happened.
    pub fn is_config(&self) -> bool {
        matches!(self, MinverError::Config(_) | MinverError::ConfigParse(_))
    }
}
