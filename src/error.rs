use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Network error: {message}")]
    Network {
        status: Option<StatusCode>,
        message: String,
    },

    #[error("Please answer every question ({answered} of {expected} answered)")]
    IncompleteAnswers { answered: usize, expected: usize },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Request cancelled")]
    Cancelled,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn network(status: Option<StatusCode>, message: impl Into<String>) -> Self {
        Error::Network {
            status,
            message: message.into(),
        }
    }

    pub fn is_auth(&self) -> bool {
        matches!(self, Error::Auth(_))
    }

    /// Status code of a non-2xx response, `None` for transport failures.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Network { status, .. } => *status,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN) => {
                Error::Auth(err.to_string())
            }
            status if err.is_decode() => {
                Error::network(status, format!("Malformed response: {}", err))
            }
            status => Error::network(status, err.to_string()),
        }
    }
}
