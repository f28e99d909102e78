//! Error types for the batch order builder

use thiserror::Error;

/// Process exit codes reported by the command-line tool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    InvalidSyntax = 2,
    CatalogFailure = 3,
    NoMatches = 4,
    BadValue = 5,
    OutputFailure = 6,
    ConfigFailure = 7,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid call number syntax: {0}")]
    InvalidSyntax(String),

    #[error("Catalog transport error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("No matching records found for the given call numbers")]
    NoMatches,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Code reported to the shell when this error ends a run
    pub fn code(&self) -> ErrorCode {
        match self {
            AppError::InvalidSyntax(_) => ErrorCode::InvalidSyntax,
            AppError::Transport(_) | AppError::Http(_) | AppError::Parse(_) => {
                ErrorCode::CatalogFailure
            }
            AppError::NoMatches => ErrorCode::NoMatches,
            AppError::InvalidInput(_) => ErrorCode::BadValue,
            AppError::Io(_) | AppError::Csv(_) => ErrorCode::OutputFailure,
            AppError::Config(_) => ErrorCode::ConfigFailure,
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ErrorCode::Failure
            }
        }
    }

    /// Whether the pipeline may skip the current term and carry on
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            AppError::Transport(_) | AppError::Http(_) | AppError::Parse(_)
        )
    }
}

impl From<ErrorCode> for std::process::ExitCode {
    fn from(code: ErrorCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
