use thiserror::Error;

#[derive(Debug, Error)]
pub enum SprintError {
    /// A line of an HSP or pair file could not be parsed
    #[error("Parse error at line {line}: {reason} (`{content}`)")]
    Parse {
        /// The line number (1-based)
        line: usize,
        content: String,
        reason: String,
    },

    #[error("Sequence not found: {0}")]
    NotFound(String),

    #[error("`{0}` is not a valid format. Please choose one from `dict` and `array`.")]
    InvalidFormat(String),

    #[error("Segment out of bounds: {0}")]
    OutOfBounds(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Duplicate sequence name: {0}")]
    Duplicate(String),

    #[error("Invalid prediction file: {0}")]
    Container(String),

    #[error("Worker failed: {0}")]
    Worker(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, SprintError>;

impl SprintError {
    pub fn parse(line: usize, content: &str, reason: impl Into<String>) -> Self {
        SprintError::Parse {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}
