use axum::{extract::State, response::Response};

use crate::{api::found, server::AppState};

pub async fn login(State(state): State<AppState>) -> Response {
    found(&state.oauth.authorize_url())
}
