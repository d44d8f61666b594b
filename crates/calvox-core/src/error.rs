//! Centralized error type for skill and runtime code.
//!
//! Library crates underneath (auth, calendar) keep their own error types;
//! everything a skill handler can fail with converges here so the runtime
//! can log it and, where one exists, speak a user-appropriate message.

use thiserror::Error;

/// Top-level error type for skill initialization and intent handling.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Dialog `{name}` failed: {message}")]
    Dialog { name: String, message: String },

    #[error("Unknown intent: {0}")]
    UnknownIntent(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SkillError {
    /// Returns a message suitable for speaking back to the user.
    ///
    /// These are deliberately non-technical; the full error chain goes to
    /// the log, not the speaker.
    pub fn spoken_message(&self) -> &'static str {
        match self {
            SkillError::Config(_) => "My configuration looks wrong. Please check my settings.",
            SkillError::Dialog { .. } => "I don't know how to phrase that.",
            SkillError::UnknownIntent(_) => "I'm not sure what you asked for.",
            SkillError::Io(_) => "A file operation failed. Please try again.",
            SkillError::Other(_) => "Something went wrong. Please try again.",
        }
    }
}
