use thiserror::Error;

/// Failure of a single API call.
///
/// Callers get a human-readable message and nothing else; the backend's error
/// body shape is not relied upon.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    /// The backend answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    /// The request never got an answer (DNS, connection refused, TLS, ...).
    #[error("network error: {0}")]
    Network(String),

    /// A 2xx answer whose body does not match the expected schema.
    #[error("unexpected response: {0}")]
    Malformed(String),

    /// The login endpoint rejected the name/password pair.
    #[error("invalid username or password")]
    CredentialsInvalid,
}

impl RequestError {
    pub fn status(&self) -> Option<u16> {
        match self {
            RequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        RequestError::Network(err.to_string())
    }
}
