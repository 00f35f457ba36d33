use axum::{Json, extract::State};

use crate::{
    error::AppError, management::AuthState, server::AppState, types::TrackSnapshot, utils,
};

/// Reports what the user is listening to right now.
///
/// Unauthenticated callers get 401 with `auth_needed: true` so the frontend
/// can start the login. The access token is never part of the response.
pub async fn current_song(
    State(state): State<AppState>,
) -> Result<Json<TrackSnapshot>, AppError> {
    let session = match state.oauth.state().await? {
        AuthState::Authenticated(session) => session,
        AuthState::Unauthenticated => return Err(AppError::NotAuthenticated),
    };

    let payload = session.client.currently_playing().await?;
    Ok(Json(utils::shape_currently_playing(payload)))
}
