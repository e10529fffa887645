//! # Spotify Integration Module
//!
//! This module is the integration layer between sprofcli and the Spotify
//! accounts service and Web API. It handles the authorization code exchange,
//! every data retrieval the CLI needs, and the batched audio-feature lookup.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Report)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorization code, client secret or PKCE)
//!     ├── Profile (current user)
//!     ├── Tracks (recently played, top tracks, genre search)
//!     ├── Artists (top artists)
//!     └── Features (batched audio features)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization URL construction, code exchange and the
//!   interactive browser flow backed by the local callback server.
//! - [`profile`] - `GET /me`.
//! - [`tracks`] - Recently played, top tracks and genre search, plus the
//!   [`tracks::TrackItems`] trait that flattens their differently shaped
//!   responses into one list of track ids.
//! - [`artists`] - Top artists, the source of the top genres.
//! - [`features`] - `GET /audio-features` in chunks of at most 100 ids.
//!
//! ## Request Model
//!
//! Every call takes the [`Settings`](crate::config::Settings) it should talk
//! to and the bearer token explicitly. Calls are issued one after another;
//! nothing here retries, backs off or runs requests concurrently. A
//! non-success status is turned into [`ApiError::Status`] and returned to the
//! caller, which decides whether to skip a section or abort.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - Authorization code exchange
//! - `GET /me` - Current user's profile
//! - `GET /me/player/recently-played` - Listening history
//! - `GET /me/top/{artists|tracks}` - Top items for a time range
//! - `GET /search` - Tracks of a genre
//! - `GET /audio-features` - Audio features for up to 100 tracks
//!
//! ## Token Lifetime
//!
//! The access token is held in memory for the duration of one command. It is
//! never written to disk and never refreshed.

use reqwest::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub mod artists;
pub mod auth;
pub mod features;
pub mod profile;
pub mod tracks;

async fn send_checked(request: RequestBuilder, endpoint: &str) -> Result<Response, ApiError> {
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
        });
    }
    Ok(response)
}

async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    endpoint: &str,
) -> Result<T, ApiError> {
    let response = send_checked(request, endpoint).await?;
    Ok(response.json::<T>().await?)
}
