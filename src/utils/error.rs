use crate::utils::output::OutputStyle;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    #[error("Invalid domain: {0}")]
    InvalidDomain(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Discovery error: {0}")]
    Discovery(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("System error: {0}")]
    System(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Result type alias for consistent error handling across the application
pub type AppResult<T> = Result<T, AppError>;

pub fn report_error(err: &AppError) {
    match err {
        AppError::InvalidDomain(msg) | AppError::Validation(msg) => {
            eprintln!("⚠️  {}", OutputStyle::warning(msg));
        }
        AppError::Discovery(msg) => {
            eprintln!("🔎 {}", OutputStyle::error(&format!("Discovery: {}", msg)));
        }
        AppError::Network(msg) => {
            eprintln!("🌐 {}", OutputStyle::error(&format!("Network: {}", msg)));
        }
        AppError::Io(msg) | AppError::System(msg) => {
            eprintln!("❌ {}", OutputStyle::error(msg));
        }
    }
}
