use thiserror::Error;

use crate::upstream::UpstreamError;

/// Reply sent when a number was expected but the text did not parse as one.
pub const INVALID_VALUE_MESSAGE: &str = "Incorrect value, please enter a number.";

/// Reply sent when an on-demand city lookup yields no usable weather record.
pub const UNKNOWN_CITY_MESSAGE: &str = "This city does not exist.";

/// Centralized error types for the application
///
/// Uses `thiserror` for automatic error conversion and display formatting.
/// Only `InvalidInput` and `UnknownCity` are shown to chat users; everything
/// else is logged.
///
/// # Example
///
/// ```no_run
/// use berdybot::core::error::AppError;
///
/// fn handle_error(err: AppError) {
///     eprintln!("Error: {}", err);
/// }
/// ```
#[derive(Error, Debug)]
pub enum AppError {
    /// An upstream data provider could not be reached or returned garbage
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// The user typed something that is not a number where one was required
    #[error("Invalid input: {0:?}")]
    InvalidInput(String),

    /// City lookup failed for the given place name
    #[error("Unknown city: {0:?}")]
    UnknownCity(String),

    /// Missing or inconsistent configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Fixed text to show the user for recoverable errors, `None` for errors
    /// that should only be logged.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            AppError::InvalidInput(_) => Some(INVALID_VALUE_MESSAGE),
            AppError::UnknownCity(_) => Some(UNKNOWN_CITY_MESSAGE),
            _ => None,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;
