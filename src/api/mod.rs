//! # API Module
//!
//! HTTP endpoints of the local server that stands in for the browser page
//! Spotify redirects to after the user granted access.
//!
//! ## Endpoints
//!
//! - [`callback`] - Receives `code`, `state` or `error` from the accounts
//!   service, checks `state` against the running session and exchanges the
//!   code for an access token. The outcome is stored in the shared
//!   [`AuthSession`](crate::types::AuthSession) that the waiting auth flow polls.
//! - [`health`] - Reports status, name and version.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use sprofcli::api::{callback, health};
//!
//! let app = Router::new()
//!     .route("/callback", get(callback))
//!     .route("/health", get(health));
//! ```

mod callback;
mod health;

pub use callback::{CallbackParams, callback};
pub use health::health;
