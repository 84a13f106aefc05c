use thiserror::Error;

#[derive(Error, Debug)]
pub enum NoteError {
    #[error("Note with ID '{note_id}' not found")]
    NotFound { note_id: String },

    #[error("Invalid request: {message}")]
    InvalidCommand { message: String },

    #[error("Generation failed: {cause}")]
    GenerationFailed { cause: String },

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 對外分類，HTTP 層依此決定狀態碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    NotFound,
    InvalidRequest,
    ServiceUnavailable,
    Internal,
}

impl NoteError {
    pub fn not_found(note_id: impl Into<String>) -> Self {
        NoteError::NotFound {
            note_id: note_id.into(),
        }
    }

    pub fn invalid_command(message: impl Into<String>) -> Self {
        NoteError::InvalidCommand {
            message: message.into(),
        }
    }

    pub fn generation(cause: impl std::fmt::Display) -> Self {
        NoteError::GenerationFailed {
            cause: cause.to_string(),
        }
    }

    /// Collapses any failure raised while talking to the generator into
    /// `GenerationFailed`, keeping the original message as the cause.
    pub fn into_generation_failure(self) -> Self {
        match self {
            NoteError::GenerationFailed { .. } => self,
            other => NoteError::generation(other),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            NoteError::NotFound { .. } => ErrorCategory::NotFound,
            NoteError::InvalidCommand { .. } => ErrorCategory::InvalidRequest,
            NoteError::GenerationFailed { .. } | NoteError::HttpError(_) => {
                ErrorCategory::ServiceUnavailable
            }
            NoteError::IoError(_)
            | NoteError::SerializationError(_)
            | NoteError::ConfigValidationError { .. }
            | NoteError::MissingConfigError { .. }
            | NoteError::InvalidConfigValueError { .. } => ErrorCategory::Internal,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            NoteError::NotFound { note_id } => format!("Note '{}' does not exist", note_id),
            NoteError::InvalidCommand { message } => format!("Invalid request: {}", message),
            NoteError::GenerationFailed { .. } | NoteError::HttpError(_) => {
                "The language model service is currently unavailable".to_string()
            }
            NoteError::IoError(e) => format!("File system error: {}", e),
            NoteError::SerializationError(e) => format!("Could not encode document: {}", e),
            NoteError::ConfigValidationError { field, .. }
            | NoteError::MissingConfigError { field }
            | NoteError::InvalidConfigValueError { field, .. } => {
                format!("Configuration problem with '{}': {}", field, self)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            NoteError::NotFound { .. } => "Check the note ID against GET /notes",
            NoteError::InvalidCommand { .. } => {
                "Use one of: summarize, enlarge, format, profile_insight"
            }
            NoteError::GenerationFailed { .. } | NoteError::HttpError(_) => {
                "Verify GROQ_API_KEY and the llm.base_url setting, then try again"
            }
            NoteError::IoError(_) => "Check that the output directory is writable",
            NoteError::SerializationError(_) => "Check the notes data file for invalid JSON",
            NoteError::MissingConfigError { .. } => {
                "Set the missing value in the config file or environment"
            }
            NoteError::ConfigValidationError { .. } | NoteError::InvalidConfigValueError { .. } => {
                "Fix the config value and restart"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, NoteError>;
