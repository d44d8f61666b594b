//! Cached-credential lookup: the one validity check the skill performs.

use anyhow::{Context, Result};

use crate::flow::GOOGLE_SERVICE;
use crate::google::GoogleOAuth2Provider;
use crate::storage::TokenStorage;

/// Get a valid Google access token, refreshing through the provider if the
/// stored one has expired.
///
/// Fails when no token is stored, when the stored token has no refresh
/// token, or when the refresh itself is rejected - the callers treat all
/// three as "credentials absent or invalid".
pub async fn valid_access_token(
    provider: &GoogleOAuth2Provider,
    storage: &TokenStorage,
) -> Result<String> {
    let token_set = storage
        .retrieve(GOOGLE_SERVICE)
        .context("No stored Google credentials")?;

    if !token_set.is_expired() {
        return Ok(token_set.access_token);
    }

    let refresh_token = token_set
        .refresh_token
        .clone()
        .context("Stored credentials are expired and have no refresh token")?;

    tracing::info!("Access token expired; refreshing");
    let refreshed = provider
        .refresh_token(&refresh_token)
        .await?
        .into_token_set(token_set.refresh_token);

    let access_token = refreshed.access_token.clone();
    storage.store(GOOGLE_SERVICE, &refreshed)?;

    Ok(access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::TokenSet;

    #[tokio::test]
    async fn test_fresh_token_is_returned_without_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::at(dir.path());
        storage
            .store(
                GOOGLE_SERVICE,
                &TokenSet {
                    access_token: "fresh".to_string(),
                    refresh_token: None,
                    expires_at: chrono::Utc::now().timestamp() + 3600,
                    scopes: vec![],
                },
            )
            .unwrap();

        let provider = GoogleOAuth2Provider::new("id".to_string(), "secret".to_string());
        let token = valid_access_token(&provider, &storage).await.unwrap();
        assert_eq!(token, "fresh");
    }

    #[tokio::test]
    async fn test_missing_token_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::at(dir.path());
        let provider = GoogleOAuth2Provider::new("id".to_string(), "secret".to_string());

        let result = valid_access_token(&provider, &storage).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_expired_token_without_refresh_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = TokenStorage::at(dir.path());
        storage
            .store(
                GOOGLE_SERVICE,
                &TokenSet {
                    access_token: "stale".to_string(),
                    refresh_token: None,
                    expires_at: chrono::Utc::now().timestamp() - 60,
                    scopes: vec![],
                },
            )
            .unwrap();

        let provider = GoogleOAuth2Provider::new("id".to_string(), "secret".to_string());
        let result = valid_access_token(&provider, &storage).await;
        assert!(result.is_err());
    }
}
