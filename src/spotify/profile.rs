use reqwest::Client;

use crate::{config::Settings, error::ApiError, spotify::get_json, types::Profile};

/// Retrieves the profile of the user the token belongs to.
///
/// Calls `GET {api}/me`. Besides the id the response carries the display
/// name, e-mail address and country (depending on the granted scopes) and
/// the profile images.
///
/// # Errors
///
/// A non-success status (e.g. 401 for an invalid token) is returned as
/// [`ApiError::Status`]; transport and decoding failures as [`ApiError::Http`].
///
/// # Example
///
/// ```
/// let profile = get_profile(&settings, &token.access_token).await?;
/// println!("Hello {}", profile.display_name.unwrap_or_default());
/// ```
pub async fn get_profile(settings: &Settings, token: &str) -> Result<Profile, ApiError> {
    let api_url = format!("{uri}/me", uri = settings.api_url);

    let client = Client::new();
    get_json(client.get(&api_url).bearer_auth(token), "/me").await
}
