use chrono::{DateTime, Local, Utc};
use std::fmt;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// Transient message shown after an action, the terminal take on a toast.
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
            at: Utc::now(),
        }
    }

    /// Error notice with a short context prefix, e.g. "Could not submit the quiz".
    /// Auth errors carry the server's own message ("Invalid credentials").
    pub fn failure(context: &str, err: &Error) -> Self {
        let detail = match err {
            Error::Auth(message) => message.clone(),
            Error::Network { status: None, .. } => {
                "the quiz server could not be reached".to_string()
            }
            other => other.to_string(),
        };
        Self::error(format!("{}: {}", context, detail))
    }

    /// A signed-in request was rejected and the session has ended.
    pub fn session_ended(context: &str) -> Self {
        Self::error(format!(
            "{}: your session is no longer valid, please log in again",
            context
        ))
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.level {
            NoticeLevel::Success => "ok",
            NoticeLevel::Error => "error",
        };
        write!(
            f,
            "[{} {}] {}",
            self.at.with_timezone(&Local).format("%H:%M:%S"),
            tag,
            self.message
        )
    }
}
