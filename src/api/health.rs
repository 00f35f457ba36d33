use axum::{Json, extract::State};
use serde::Serialize;

use crate::{management::AuthState, server::AppState};

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub authenticated: bool,
}

/// Reports whether a usable token is cached.
///
/// Resolving the state may refresh an expiring token, same as
/// `/current-song`. A failed refresh or an unreadable store is reported as
/// `degraded` instead of an error status.
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
    let report = match state.oauth.state().await {
        Ok(AuthState::Authenticated(_)) => HealthReport {
            status: "ok",
            authenticated: true,
        },
        Ok(AuthState::Unauthenticated) => HealthReport {
            status: "ok",
            authenticated: false,
        },
        Err(e) => {
            tracing::warn!("health check could not resolve auth state: {}", e);
            HealthReport {
                status: "degraded",
                authenticated: false,
            }
        }
    };

    Json(report)
}
