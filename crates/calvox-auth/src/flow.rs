//! Interactive OAuth2 authorization: browser plus local callback server.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::oneshot;
use warp::Filter;

use crate::google::GoogleOAuth2Provider;
use crate::storage::{TokenSet, TokenStorage};

/// Service identifier the calendar token is stored under.
pub const GOOGLE_SERVICE: &str = "google";

/// Port the local callback server listens on.
pub const CALLBACK_PORT: u16 = 8080;

/// Perform the full OAuth2 flow: open the browser, wait for the callback,
/// validate the state, exchange the code, and store the resulting tokens.
pub async fn authenticate(
    provider: &GoogleOAuth2Provider,
    storage: &TokenStorage,
) -> Result<TokenSet> {
    let (auth_url, expected_state) = provider.authorization_url(CALLBACK_PORT);

    tracing::info!("Opening browser for OAuth2 authorization...");
    tracing::info!("Auth URL: {}", auth_url);

    // Start local callback server
    let (tx, rx) = oneshot::channel();
    let tx = Arc::new(tokio::sync::Mutex::new(Some(tx)));

    let routes = warp::get()
        .and(warp::path("callback"))
        .and(warp::query::<std::collections::HashMap<String, String>>())
        .and(warp::any().map(move || tx.clone()))
        .and_then(
            |params: std::collections::HashMap<String, String>,
             tx: Arc<tokio::sync::Mutex<Option<oneshot::Sender<(String, String)>>>>| async move {
                let code = params.get("code").cloned().unwrap_or_default();
                let state = params.get("state").cloned().unwrap_or_default();

                if let Some(sender) = tx.lock().await.take() {
                    let _ = sender.send((code, state));
                }

                Ok::<_, warp::Rejection>(warp::reply::html(
                    "<html><body><h1>Authorization successful!</h1>\
                     <p>You can close this window; your calendar skill is connected.</p>\
                     </body></html>",
                ))
            },
        );

    // Start server in background
    let server = warp::serve(routes).bind(([127, 0, 0, 1], CALLBACK_PORT));
    tokio::spawn(server);

    // Open browser
    webbrowser::open(&auth_url).context("Failed to open browser")?;

    // Wait for callback
    let (code, state) = rx.await.context("Failed to receive OAuth callback")?;

    // Validate state
    if state != expected_state {
        anyhow::bail!("OAuth state mismatch");
    }

    let token_set = provider
        .exchange_code(&code, CALLBACK_PORT)
        .await?
        .into_token_set(None);

    storage.store(GOOGLE_SERVICE, &token_set)?;

    tracing::info!("OAuth2 flow completed for {}", GOOGLE_SERVICE);
    Ok(token_set)
}
