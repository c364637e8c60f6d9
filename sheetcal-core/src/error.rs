//! Error types for sheetcal.

use thiserror::Error;

/// Errors that abort a sheetcal run.
///
/// None of these leave a partially written calendar behind: the output file
/// is only touched after the whole calendar has been rendered.
#[derive(Error, Debug)]
pub enum SheetCalError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("Provider '{0}' not found in PATH")]
    ProviderNotInstalled(String),

    #[error("Provider request timed out after {0}s")]
    ProviderTimeout(u64),

    #[error("Missing required column '{0}' in sheet header")]
    MissingColumn(String),

    #[error("Existing calendar at {0} could not be parsed")]
    UnreadableCalendar(String),

    #[error("ICS generation error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for sheetcal operations.
pub type SheetCalResult<T> = Result<T, SheetCalError>;

/// Why a single sheet row was left out of the calendar.
///
/// Row errors never abort a run; the normalizer logs them and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing value for required column '{0}'")]
    MissingField(&'static str),

    #[error("ID '{0}' is not an integer")]
    InvalidId(String),

    #[error("date '{0}' does not match MM-DD")]
    InvalidDate(String),

    #[error("time '{0}' does not match HH:MM AM/PM")]
    InvalidTime(String),

    #[error("{0} does not exist in the calendar timezone")]
    NonexistentLocalTime(String),

    #[error("ticket count '{0}' is not an integer")]
    InvalidTicketCount(String),
}
