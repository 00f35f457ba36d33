use axum::{
    extract::{Query, State},
    response::Response,
};
use serde::Deserialize;

use crate::{api::found, error::AppError, server::AppState};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    error: Option<String>,
}

/// Completes the authorization code flow and sends the browser home.
///
/// The provider redirects here with either `code` or `error`. A denied
/// consent or a missing code is answered with 400 and leaves the store
/// untouched.
pub async fn callback(
    State(state): State<AppState>,
    Query(params): Query<CallbackParams>,
) -> Result<Response, AppError> {
    if let Some(reason) = params.error {
        tracing::warn!(%reason, "authorization was not granted");
        return Err(AppError::BadRequest(format!(
            "Authorization failed: {}",
            reason
        )));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        return Err(AppError::BadRequest(
            "Missing authorization code".to_string(),
        ));
    };

    state.oauth.exchange_code(&code).await?;
    Ok(found("/"))
}
