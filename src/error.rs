use thiserror::Error;

#[derive(Error, Debug)]
pub enum SentenceError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("Parse error: {message}")]
    Parse { message: String, line: Option<usize>, col: Option<usize> },
    #[error("Missing value for placeholder {index}: only {available} value(s) supplied")]
    MissingValue { index: usize, available: usize },
    #[error("Malformed placeholder '{placeholder}': {reason}")]
    MalformedPlaceholder { placeholder: String, reason: String },
    #[error("Invalid pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },
    #[error("Edit error: {0}")]
    Edit(String),
}

impl SentenceError {
    /// Errors caused by the definition itself rather than by how it is used.
    pub fn is_parse(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::MalformedPlaceholder { .. } | Self::Pattern { .. } | Self::MissingValue { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SentenceError>;

// Helper conversions
impl From<config::ConfigError> for SentenceError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
