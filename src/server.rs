use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, config::Settings, types::AuthSession};

pub fn router(session: Arc<Mutex<AuthSession>>, settings: Arc<Settings>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback))
        .layer(Extension(session))
        .layer(Extension(settings))
}

/// Binds the callback listener on `settings.server_addr`.
///
/// Fails right away when the address does not parse or is already in use.
pub async fn bind_api_server(settings: &Settings) -> std::io::Result<TcpListener> {
    let addr = SocketAddr::from_str(&settings.server_addr).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Failed to parse server address {}: {}", settings.server_addr, e),
        )
    })?;

    TcpListener::bind(&addr).await
}

pub async fn start_api_server(
    listener: TcpListener,
    session: Arc<Mutex<AuthSession>>,
    settings: Arc<Settings>,
) -> std::io::Result<()> {
    axum::serve(listener, router(session, settings)).await
}
