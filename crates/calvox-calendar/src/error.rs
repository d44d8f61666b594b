//! Calendar-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Authentication required")]
    AuthRequired,

    #[error("Token expired")]
    TokenExpired,

    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    #[error("Calendar not found: {0}")]
    CalendarNotFound(String),

    #[error("Invalid event data: {0}")]
    InvalidEventData(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}

impl CalendarError {
    /// Message suitable for speaking back to the user.
    pub fn spoken_message(&self) -> String {
        match self {
            Self::AuthRequired => "Please connect your Google account first.".to_string(),
            Self::TokenExpired => "Your calendar session has expired. Please sign in again.".to_string(),
            Self::RateLimited(secs) => {
                format!("The calendar is busy. Please try again in {} seconds.", secs)
            }
            Self::CalendarNotFound(_) => "I couldn't find that calendar.".to_string(),
            Self::InvalidEventData(msg) => format!("An event looked wrong: {}", msg),
            Self::ApiError(_) => "The calendar service returned an error.".to_string(),
            Self::NetworkError(_) => "I couldn't reach the calendar. Check your connection.".to_string(),
        }
    }

    /// Whether this error should trigger a token refresh.
    pub fn should_refresh_token(&self) -> bool {
        matches!(self, Self::TokenExpired | Self::AuthRequired)
    }
}
