use std::sync::Arc;

use reqwest::Client;

use crate::{
    config::Config,
    error::AppError,
    management::TokenStore,
    spotify::{self, SpotifyClient},
    types::TokenInfo,
    utils,
};

/// Authentication state of the single user, derived from the token store.
#[derive(Debug)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(Session),
}

/// A usable token together with an API client bound to it.
#[derive(Debug, Clone)]
pub struct Session {
    pub client: SpotifyClient,
    pub token: TokenInfo,
}

/// Owns the OAuth flow: authorize URL, code exchange and token refresh.
///
/// The manager never caches a token in memory. Each call to [`state`]
/// reads the store, so the cache file stays the single source of truth.
///
/// [`state`]: OAuthManager::state
pub struct OAuthManager {
    config: Arc<Config>,
    http: Client,
    store: Arc<dyn TokenStore>,
}

impl OAuthManager {
    pub fn new(config: Arc<Config>, http: Client, store: Arc<dyn TokenStore>) -> Self {
        OAuthManager {
            config,
            http,
            store,
        }
    }

    pub fn authorize_url(&self) -> String {
        spotify::auth::authorize_url(&self.config)
    }

    /// Turns an authorization code into a token and persists it.
    pub async fn exchange_code(&self, code: &str) -> Result<TokenInfo, AppError> {
        let token = spotify::auth::exchange_code(&self.http, &self.config, code).await?;
        self.store.put(&token).await?;
        tracing::info!(expires_at = token.expires_at, "stored new spotify token");
        Ok(token)
    }

    /// Resolves the current authentication state.
    ///
    /// Loads the cached token. A token that expires within
    /// [`utils::REFRESH_MARGIN_SECS`] is refreshed once and written back
    /// before the session is handed out. A token granted for a narrower
    /// scope than the configured one counts as absent; an empty scope (older
    /// cache records) is accepted.
    ///
    /// # Errors
    ///
    /// A failed refresh is returned as [`AppError::Upstream`]; store
    /// failures as [`AppError::Store`].
    pub async fn state(&self) -> Result<AuthState, AppError> {
        let Some(mut token) = self.store.get().await? else {
            return Ok(AuthState::Unauthenticated);
        };

        if !token.scope.is_empty() && !utils::scope_covers(&token.scope, &self.config.scope) {
            tracing::info!(
                granted = %token.scope,
                requested = %self.config.scope,
                "cached token lacks requested scope"
            );
            return Ok(AuthState::Unauthenticated);
        }

        if utils::is_token_expiring(&token, utils::now_timestamp()) {
            tracing::info!("access token about to expire, refreshing");
            token = spotify::auth::refresh_token(&self.http, &self.config, &token).await?;
            self.store.put(&token).await?;
        }

        let client = SpotifyClient::new(
            self.http.clone(),
            self.config.api_url.clone(),
            token.access_token.clone(),
        );

        Ok(AuthState::Authenticated(Session { client, token }))
    }
}
