use std::io::ErrorKind;

use axum::{extract::State, http::StatusCode, response::Html};

use crate::server::AppState;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, StatusCode> {
    let path = state.static_dir.join("index.html");
    match async_fs::read_to_string(&path).await {
        Ok(page) => Ok(Html(page)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "index page not found");
            Err(StatusCode::NOT_FOUND)
        }
        Err(e) => {
            tracing::error!(path = %path.display(), "cannot read index page: {}", e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
