use reqwest::StatusCode;
use thiserror::Error;

/// Errors raised while assembling [`crate::config::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set or empty
    #[error("{0} must be set")]
    Missing(&'static str),

    /// The `.env` file exists but could not be read or parsed
    #[error("Failed to load env file: {0}")]
    EnvFile(String),

    /// The local data directory could not be prepared
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by calls against the Spotify accounts service and Web API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport, TLS or body decoding failure
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("{endpoint} responded with {status}")]
    Status {
        endpoint: String,
        status: StatusCode,
    },

    /// The token endpoint answered without an `access_token`
    #[error("Token response did not contain an access token")]
    MissingAccessToken,

    /// A configured endpoint could not be turned into a URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Neither a client secret nor a PKCE verifier is available for the exchange
    #[error("Code exchange needs a client secret or a PKCE code verifier")]
    MissingCredentials,
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            _ => None,
        }
    }
}
