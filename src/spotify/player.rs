use reqwest::{Client, StatusCode};

use crate::{error::AppError, types::CurrentlyPlaying};

/// Authenticated handle on the Web API for one access token.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
    access_token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, api_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            access_token: access_token.into(),
        }
    }

    /// Retrieves the user's current playback state.
    ///
    /// Calls `GET /me/player/currently-playing`. The API answers
    /// `204 No Content` when no device is active, which is returned as
    /// `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Network failures, non-success statuses and undecodable bodies are
    /// all reported as [`AppError::Upstream`]. There is no retry.
    pub async fn currently_playing(&self) -> Result<Option<CurrentlyPlaying>, AppError> {
        let api_url = format!(
            "{uri}/me/player/currently-playing",
            uri = &self.api_url
        );

        let response = self
            .http
            .get(&api_url)
            .bearer_auth(&self.access_token)
            .send()
            .await?;

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.error_for_status()?.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }

        serde_json::from_slice::<CurrentlyPlaying>(&body)
            .map(Some)
            .map_err(|e| AppError::Upstream(format!("malformed playback state: {}", e)))
    }
}
