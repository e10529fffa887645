use crate::{config::Settings, error, info, spotify, success, warning};

/// Where the access token of a command comes from.
#[derive(Debug, Clone)]
pub enum TokenSource {
    /// A token obtained earlier, e.g. printed by `sprofcli auth`
    Provided(String),
    /// An authorization code obtained outside this process
    Code(String),
    /// The interactive browser flow
    Browser,
}

impl TokenSource {
    pub fn from_args(token: Option<String>, code: Option<String>) -> Self {
        match (token, code) {
            (Some(token), _) => TokenSource::Provided(token),
            (None, Some(code)) => TokenSource::Code(code),
            (None, None) => TokenSource::Browser,
        }
    }
}

/// Resolves an access token, reporting failures as warnings.
///
/// Returns `None` when no token could be obtained so that callers can decide
/// whether to stop or to skip their requests.
pub async fn acquire_token(settings: &Settings, source: &TokenSource) -> Option<String> {
    match source {
        TokenSource::Provided(token) => Some(token.clone()),
        TokenSource::Code(code) => {
            match spotify::auth::exchange_code(settings, code, None).await {
                Ok(token) => Some(token.access_token),
                Err(e) => {
                    warning!("Failed to exchange authorization code: {}", e);
                    None
                }
            }
        }
        TokenSource::Browser => match spotify::auth::auth(settings).await {
            Ok(token) => {
                success!("Authentication successful!");
                Some(token.access_token)
            }
            Err(e) => {
                warning!("{}", e);
                None
            }
        },
    }
}

pub async fn auth(settings: &Settings, source: &TokenSource) {
    match acquire_token(settings, source).await {
        Some(token) => {
            info!("Access token (valid for about an hour, pass it with --token):");
            println!("{}", token);
        }
        None => error!("Authentication failed or timed out."),
    }
}

pub(super) async fn require_token(settings: &Settings, source: &TokenSource) -> String {
    match acquire_token(settings, source).await {
        Some(token) => token,
        None => error!("No access token available. Run sprofcli auth or pass --token."),
    }
}
