use thiserror::Error;

/// Unified error type for autover operations
#[derive(Error, Debug)]
pub enum AutoVersionError {
    #[error("Failed to launch '{executable}': {source}")]
    ProcessLaunch {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{stderr}\nExitCode: {code}")]
    ProcessExit { stderr: String, code: i32 },

    #[error("Malformed git output: {0}")]
    MalformedOutput(String),

    #[error("Argument out of range: {0}")]
    ArgumentRange(String),

    #[error("Unsupported numbering method: {0}")]
    UnsupportedMethod(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version record error: {0}")]
    Record(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in autover
pub type Result<T> = std::result::Result<T, AutoVersionError>;

impl AutoVersionError {
    /// Create a malformed-output error with context
    pub fn malformed(msg: impl Into<String>) -> Self {
        AutoVersionError::MalformedOutput(msg.into())
    }

    /// Create an argument-range error with context
    pub fn range(msg: impl Into<String>) -> Self {
        AutoVersionError::ArgumentRange(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutoVersionError::Config(msg.into())
    }

    /// Create a version record error with context
    pub fn record(msg: impl Into<String>) -> Self {
        AutoVersionError::Record(msg.into())
    }
}
