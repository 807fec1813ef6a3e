use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the backend gateway and the components built on it.
///
/// None of these are fatal: every variant describes a recoverable condition
/// that the caller reports and may retry by user action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Transport failure or timeout talking to the backend.
    #[error("Cannot reach the search backend: {0}")]
    Network(String),

    /// Input rejected locally or by the backend.
    #[error("{0}")]
    Validation(String),

    /// The backend answered but failed to do the work.
    #[error("Backend error ({status}): {message}")]
    Server { status: u16, message: String },

    /// The backend reported the target as missing.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_))
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            let status = e.status().map(|s| s.as_u16()).unwrap_or(200);
            Error::Server {
                status,
                message: format!("malformed response: {}", e),
            }
        } else if e.is_timeout() {
            Error::Network(format!("request timed out: {}", e))
        } else {
            Error::Network(e.to_string())
        }
    }
}
