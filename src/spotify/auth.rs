use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::{Client, Url};
use tokio::sync::Mutex;

use crate::{
    config::Settings,
    error::ApiError,
    info,
    server::{bind_api_server, start_api_server},
    spotify::send_checked,
    types::{AuthSession, Token, TokenResponse},
    utils, warning,
};

const AUTH_TIMEOUT: Duration = Duration::from_secs(60);

/// Runs the interactive authorization code flow and returns the access token.
///
/// # Flow
///
/// 1. **State Setup**: Generates a random `state` value and, when no client
///    secret is configured, a PKCE code verifier and its S256 challenge
/// 2. **Server Start**: Launches the local callback server on
///    `settings.server_addr`
/// 3. **Browser Launch**: Opens the authorization URL in the default browser
/// 4. **Callback Handling**: The callback verifies `state` and exchanges the
///    code through [`exchange_code`]
/// 5. **Shutdown**: The callback server is stopped once a token arrived, the
///    user denied access, or 60 seconds passed
///
/// The token is only returned, never persisted.
///
/// # Errors
///
/// Returns a message when the authorization URL cannot be built or the
/// callback server cannot bind `settings.server_addr`. The same goes for a
/// denied authorization, a failed exchange and a timeout.
///
/// # Example
///
/// ```
/// let settings = config::Settings::from_env()?;
/// let token = auth(&settings).await?;
/// println!("Access token expires in {} seconds", token.expires_in);
/// ```
pub async fn auth(settings: &Settings) -> Result<Token, String> {
    let state = utils::generate_state();
    let (code_verifier, code_challenge) = if settings.uses_pkce() {
        let verifier = utils::generate_code_verifier();
        let challenge = utils::generate_code_challenge(&verifier);
        (Some(verifier), Some(challenge))
    } else {
        (None, None)
    };

    let auth_url =
        authorize_url(settings, &state, code_challenge.as_deref()).map_err(|e| e.to_string())?;

    let session = Arc::new(Mutex::new(AuthSession {
        state,
        code_verifier,
        token: None,
        error: None,
    }));

    let listener = bind_api_server(settings).await.map_err(|e| {
        format!(
            "Failed to start callback server on {}: {}",
            settings.server_addr, e
        )
    })?;

    let server_state = Arc::clone(&session);
    let server_settings = Arc::new(settings.clone());
    let server = tokio::spawn(async move {
        if let Err(e) = start_api_server(listener, server_state, server_settings).await {
            warning!("Callback server stopped: {}", e);
        }
    });

    info!("Waiting for authorization callback on {}", settings.redirect_uri);
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let result = wait_for_token(session).await;
    server.abort();
    result
}

/// Polls the shared session until the callback stored a token or an error.
async fn wait_for_token(session: Arc<Mutex<AuthSession>>) -> Result<Token, String> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < AUTH_TIMEOUT {
        {
            let lock = session.lock().await;
            if let Some(token) = &lock.token {
                return Ok(token.clone());
            }
            if let Some(error) = &lock.error {
                return Err(error.clone());
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    Err("Authentication timed out.".to_string())
}

/// Builds the URL the user is sent to in order to grant access.
///
/// The query carries `client_id`, `response_type=code`, `redirect_uri`,
/// `scope` and `state`. When a PKCE challenge is given it is added with
/// `code_challenge_method=S256`. All values are URL-encoded.
pub fn authorize_url(
    settings: &Settings,
    state: &str,
    code_challenge: Option<&str>,
) -> Result<String, ApiError> {
    let mut params = vec![
        ("client_id", settings.client_id.as_str()),
        ("response_type", "code"),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("scope", settings.scope.as_str()),
        ("state", state),
    ];
    if let Some(challenge) = code_challenge {
        params.push(("code_challenge_method", "S256"));
        params.push(("code_challenge", challenge));
    }

    let url = Url::parse_with_params(&settings.auth_url, &params)
        .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", settings.auth_url, e)))?;
    Ok(url.to_string())
}

/// Exchanges an authorization code for an access token.
///
/// Sends one form-encoded `POST` to the token endpoint with
/// `grant_type=authorization_code`, the code, the redirect URI and the client
/// id. The client authenticates with `client_secret` when the settings carry
/// one, otherwise with the PKCE `code_verifier`.
///
/// # Errors
///
/// - [`ApiError::MissingCredentials`] - no secret configured and no verifier given
/// - [`ApiError::Status`] - the token endpoint rejected the request (e.g. 400
///   for an expired or reused code)
/// - [`ApiError::MissingAccessToken`] - the response carried no `access_token`
/// - [`ApiError::Http`] - network failure or malformed response body
///
/// # Example
///
/// ```
/// let token = exchange_code(&settings, "AQA...auth_code", None).await?;
/// println!("Access token: {}", token.access_token);
/// ```
pub async fn exchange_code(
    settings: &Settings,
    code: &str,
    code_verifier: Option<&str>,
) -> Result<Token, ApiError> {
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("client_id", settings.client_id.as_str()),
    ];
    match (settings.client_secret.as_deref(), code_verifier) {
        (Some(secret), _) => form.push(("client_secret", secret)),
        (None, Some(verifier)) => form.push(("code_verifier", verifier)),
        (None, None) => return Err(ApiError::MissingCredentials),
    }

    let client = Client::new();
    let request = client.post(&settings.token_url).form(&form);
    let response = send_checked(request, "/api/token").await?;
    let json = response.json::<TokenResponse>().await?;

    let access_token = json
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingAccessToken)?;

    Ok(Token {
        access_token,
        token_type: json.token_type.unwrap_or_else(|| "Bearer".to_string()),
        scope: json.scope.unwrap_or_default(),
        expires_in: json.expires_in.unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
