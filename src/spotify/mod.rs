//! # Spotify Integration Module
//!
//! Thin wrappers around the two Spotify services this backend talks to.
//!
//! ```text
//! Route handlers
//!      ↓
//! OAuth manager (management)
//!      ↓
//! ├── auth    accounts service: authorize URL, code exchange, refresh
//! └── player  Web API: currently playing
//!      ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the OAuth 2.0 authorization code flow with a client
//! secret. Token requests are form posts authenticated with HTTP Basic
//! credentials. Responses are turned into [`crate::types::TokenInfo`]
//! records with an absolute expiry.
//!
//! ## Playback
//!
//! [`player`] holds [`player::SpotifyClient`], the authenticated handle that
//! the OAuth manager gives out. It only knows the "currently playing"
//! endpoint.
//!
//! ## Error Types
//!
//! Every function returns [`crate::error::AppError::Upstream`] for
//! failures on the Spotify side. Nothing is retried.

pub mod auth;
pub mod player;

pub use player::SpotifyClient;
