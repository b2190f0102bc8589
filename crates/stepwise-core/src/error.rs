//! Error types for the study companion library.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all study operations.
#[derive(Error, Debug)]
pub enum StudyError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// The backend could not be reached or the connection failed mid-request
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Box<ureq::Error>,
    },
    /// The backend answered with a non-success status
    #[error("Server returned status {status} for {url}")]
    Server { status: u16, url: String },
    /// Plan not found for the given ID
    #[error("Plan with ID {id} not found")]
    PlanNotFound { id: u64 },
    /// User not found for the given ID
    #[error("User with ID {id} not found")]
    UserNotFound { id: u64 },
    /// Step index outside of the parsed step sequence
    #[error("Step {index} is out of range (plan has {len} steps)")]
    StepOutOfRange { index: usize, len: usize },
    /// An operation needed a selected plan
    #[error("No plan is selected")]
    NoPlanSelected,
    /// An operation needed a selected step
    #[error("No step is selected")]
    NoStepSelected,
    /// An answer was submitted while no quiz was accepting answers
    #[error("No active quiz to answer")]
    NoActiveQuiz,
    /// A quiz was requested while another one is generating or in progress
    #[error("A quiz is already in progress for this step")]
    QuizInProgress,
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> StudyError {
        StudyError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> StudyError {
        StudyError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl StudyError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Wraps a `ureq` failure, splitting HTTP status errors from transport
    /// errors.
    pub fn from_http(url: &str, error: ureq::Error) -> Self {
        match error {
            ureq::Error::Status(status, _) => StudyError::Server {
                status,
                url: url.to_string(),
            },
            other => StudyError::Transport {
                message: format!("request to {url} failed"),
                source: Box::new(other),
            },
        }
    }

    /// Error for a failed `spawn_blocking` join.
    pub(crate) fn join(error: tokio::task::JoinError) -> Self {
        StudyError::Configuration {
            message: format!("Task join error: {error}"),
        }
    }

    /// True when the error came from the network rather than from a server
    /// decision or local state.
    pub fn is_transport(&self) -> bool {
        matches!(self, StudyError::Transport { .. })
    }
}

/// Extension trait for Result to provide concise error mapping with
/// anyhow-style context.
pub trait ResultExt<T, E> {
    /// Add context to any error type, converting to StudyError.
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn with_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| StudyError::Configuration {
            message: format!("{}: {}", context, e),
        })
    }
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| StudyError::database(message).with_source(e))
    }
}

/// Result type alias for study operations
pub type Result<T> = std::result::Result<T, StudyError>;
