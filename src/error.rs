//! Session error taxonomy.
//!
//! ERROR HANDLING
//! ==============
//! Errors surface to the login form as human-readable messages, so the
//! `Display` text of each variant is the message shown to the user. The
//! [`ErrorCode`] trait adds a grepable code and a retryable flag for callers
//! that want to branch without matching on text.

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;

use crate::net::api::ApiError;

/// Grepable error code and retryable flag.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Authenticated, but the account holds no billing role.
    #[error("{0}")]
    AccessDenied(String),
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("{0}")]
    Forbidden(String),
    #[error("Login failed")]
    LoginFailed { status: u16 },
    #[error("login already in progress")]
    LoginInProgress,
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SessionError {
    /// Build the access-denied message pointing users at `contact_url`.
    #[must_use]
    pub fn access_denied(contact_url: &str) -> Self {
        Self::AccessDenied(format!(
            "Please contact your PI to get access to this application. \
             If you are a PI and having trouble accessing this page, please contact us: {contact_url}"
        ))
    }
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AccessDenied(_) => "E_ACCESS_DENIED",
            Self::InvalidCredentials => "E_INVALID_CREDENTIALS",
            Self::Forbidden(_) => "E_FORBIDDEN",
            Self::LoginFailed { .. } => "E_LOGIN_FAILED",
            Self::LoginInProgress => "E_LOGIN_IN_PROGRESS",
            Self::Api(_) => "E_API",
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::LoginFailed { status } => *status >= 500,
            Self::LoginInProgress => true,
            Self::Api(e) => e.retryable(),
            _ => false,
        }
    }
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "E_TRANSPORT",
            Self::Status { .. } => "E_STATUS",
            Self::Decode(_) => "E_DECODE",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_)) || matches!(self, Self::Status { status } if *status >= 500)
    }
}
