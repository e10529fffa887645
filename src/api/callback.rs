use std::sync::Arc;

use axum::{Extension, extract::Query, response::Html};
use serde::Deserialize;
use tokio::sync::Mutex;

use crate::{config::Settings, spotify, types::AuthSession, warning};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(session): Extension<Arc<Mutex<AuthSession>>>,
    Extension(settings): Extension<Arc<Settings>>,
) -> Html<&'static str> {
    let (code, verifier) = {
        let mut session = session.lock().await;

        if params.state.as_deref() != Some(session.state.as_str()) {
            return Html("<h4>State mismatch.</h4>");
        }

        if let Some(error) = params.error {
            session.error = Some(format!("Authorization denied: {}", error));
            return Html("<h4>Authorization denied.</h4>");
        }

        let Some(code) = params.code else {
            session.error = Some("Callback carried no authorization code.".to_string());
            return Html("<h4>Missing authorization code.</h4>");
        };

        (code, session.code_verifier.clone())
    };

    // The session stays unlocked while the exchange is in flight
    let result = spotify::auth::exchange_code(&settings, &code, verifier.as_deref()).await;

    let mut session = session.lock().await;
    match result {
        Ok(token) => {
            session.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            session.error = Some(format!("Token exchange failed: {}", e));
            Html("<h4>Login failed.</h4>")
        }
    }
}
