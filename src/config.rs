//! Configuration management for the Spotify profile CLI.
//!
//! This module handles loading configuration values from environment variables
//! and `.env` files and gathering them into a [`Settings`] record that is handed
//! to every Spotify call.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (everything except the client id)
//!
//! No credential is compiled into the binary. The client secret is optional:
//! without it the authorization code is exchanged using PKCE.

use std::{env, path::PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:5173/callback";
pub const DEFAULT_SCOPE: &str =
    "user-read-private user-read-email user-read-recently-played user-top-read";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:5173";

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the `sprofcli` data directory if it doesn't exist and loads
/// `sprofcli/.env` from it. Variables already present in the process
/// environment are not overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/sprofcli/.env`
/// - macOS: `~/Library/Application Support/sprofcli/.env`
/// - Windows: `%LOCALAPPDATA%/sprofcli/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or if the `.env` file
/// exists but cannot be parsed. A missing `.env` file is fine; the process
/// environment alone may carry the configuration.
pub async fn load_env() -> Result<(), ConfigError> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent).await?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| ConfigError::EnvFile(e.to_string()))?;
    }
    Ok(())
}

fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("sprofcli/.env");
    path
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn var_or(key: &str, default: &str) -> String {
    non_empty_var(key).unwrap_or_else(|| default.to_string())
}

/// Returns the address the local OAuth callback server binds to.
///
/// Reads `SERVER_ADDRESS`, defaulting to `127.0.0.1:5173` so that it lines up
/// with the default redirect URI.
pub fn server_addr() -> String {
    var_or("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS)
}

/// Returns the Spotify API client ID.
///
/// # Errors
///
/// Fails with [`ConfigError::Missing`] when `SPOTIFY_API_AUTH_CLIENT_ID` is
/// unset or empty. There is no sensible default for it.
pub fn spotify_client_id() -> Result<String, ConfigError> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_ID")
        .ok_or(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))
}

/// Returns the Spotify API client secret, if one is configured.
///
/// # Security Note
///
/// The secret should be kept confidential and never exposed in logs or
/// version control. Leave it unset to use the PKCE exchange instead.
pub fn spotify_client_secret() -> Option<String> {
    non_empty_var("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the OAuth redirect URI registered for the application.
pub fn spotify_redirect_uri() -> String {
    var_or("SPOTIFY_API_REDIRECT_URI", DEFAULT_REDIRECT_URI)
}

/// Returns the space separated scopes requested during authorization.
pub fn spotify_scope() -> String {
    var_or("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE)
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    var_or("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL)
}

/// Returns the Spotify Web API base URL, without a trailing slash.
pub fn spotify_apiurl() -> String {
    var_or("SPOTIFY_API_URL", DEFAULT_API_URL)
        .trim_end_matches('/')
        .to_string()
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    var_or("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL)
}

/// Every configuration value a Spotify call needs, resolved once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: String,
}

impl Settings {
    /// Resolves all settings from the (already loaded) environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            client_id: spotify_client_id()?,
            client_secret: spotify_client_secret(),
            redirect_uri: spotify_redirect_uri(),
            scope: spotify_scope(),
            auth_url: spotify_apiauth_url(),
            token_url: spotify_apitoken_url(),
            api_url: spotify_apiurl(),
            server_addr: server_addr(),
        })
    }

    /// Settings with the public Spotify endpoints and the given client id.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: None,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            scope: DEFAULT_SCOPE.to_string(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
        }
    }

    pub fn uses_pkce(&self) -> bool {
        self.client_secret.is_none()
    }
}
