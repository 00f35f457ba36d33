//! # API Module
//!
//! HTTP endpoints of the now-playing backend.
//!
//! ## Endpoints
//!
//! - [`index`] - `GET /`, the frontend page
//! - [`login`] - `GET /login`, 302 to the Spotify consent screen
//! - [`callback`] - `GET /callback`, exchanges the authorization code and
//!   redirects home
//! - [`current_song`] - `GET /current-song`, the track snapshot as JSON
//! - [`health`] - `GET /health`, whether a usable token is cached
//!
//! Everything else falls through to the static frontend directory (see
//! [`crate::server::router`]).
//!
//! ## Authentication States
//!
//! Handlers never keep session state. Whether the user is signed in is
//! decided per request by [`crate::management::OAuthManager::state`], which
//! reads the token store. Only `/callback` moves the user from
//! unauthenticated to authenticated.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use axum::{Router, routing::get};
//! use nowplaying::api::{current_song, health};
//!
//! let app = Router::new()
//!     .route("/current-song", get(current_song))
//!     .route("/health", get(health))
//!     .with_state(state);
//! ```

mod callback;
mod current_song;
mod health;
mod index;
mod login;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub use callback::callback;
pub use current_song::current_song;
pub use health::health;
pub use index::index;
pub use login::login;

/// `302 Found` to `location`. axum's `Redirect` only offers 303/307/308.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
