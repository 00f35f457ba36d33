//! Configuration management for the now-playing backend.
//!
//! This module handles loading configuration values from environment
//! variables and `.env` files, and turns them into an explicit [`Config`]
//! value that is handed to the OAuth manager and the HTTP server. Nothing
//! reads the environment after startup.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory
//! 4. Application defaults (where applicable)

use std::{net::SocketAddr, path::PathBuf};

use reqwest::Url;
use thiserror::Error;

pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0:5000";
pub const DEFAULT_TOKEN_CACHE_PATH: &str = "spotify_cache";
pub const DEFAULT_STATIC_DIR: &str = "frontend";
pub const DEFAULT_SCOPE: &str = "user-read-currently-playing";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("invalid SERVER_ADDRESS '{0}'")]
    InvalidAddress(String),
    #[error("{0} is not a valid URL")]
    InvalidUrl(&'static str),
    #[error("TLS_CERT_PATH and TLS_KEY_PATH must be set together")]
    IncompleteTls,
}

/// Runtime configuration of the backend.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: Url,
    pub token_url: String,
    pub api_url: String,
    pub server_addr: SocketAddr,
    pub token_cache_path: PathBuf,
    pub static_dir: PathBuf,
    pub tls_cert_path: Option<PathBuf>,
    pub tls_key_path: Option<PathBuf>,
}

/// Loads environment variables from a `.env` file.
///
/// The working directory (and its parents) is searched first. If no file
/// is found there, `nowplaying/.env` in the platform-specific local data
/// directory is tried:
/// - Linux: `~/.local/share/nowplaying/.env`
/// - macOS: `~/Library/Application Support/nowplaying/.env`
/// - Windows: `%LOCALAPPDATA%/nowplaying/.env`
///
/// A missing file is not an error, the variables may already be exported.
///
/// # Returns
///
/// The path of the loaded file, `None` when no file was found, or an error
/// string if a file exists but cannot be parsed.
///
/// # Example
///
/// ```
/// use nowplaying::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<Option<PathBuf>, String> {
    match dotenv::dotenv() {
        Ok(path) => return Ok(Some(path)),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.to_string()),
    }

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("nowplaying/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(None);
    }

    dotenv::from_path(&path).map_err(|e| e.to_string())?;
    Ok(Some(path))
}

impl Config {
    /// Builds the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Required values are `CLIENT_ID`, `CLIENT_SECRET` and `REDIRECT_URI`;
    /// each one also accepts a `SPOTIPY_`-prefixed name. Empty values count
    /// as missing.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str, fallback: &str| {
            get(key).or_else(|| get(fallback)).ok_or(ConfigError::Missing(key))
        };
        let or_default = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let raw_addr = or_default("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS);
        let server_addr = raw_addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress(raw_addr.clone()))?;

        let auth_url = Url::parse(&or_default("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL))
            .map_err(|_| ConfigError::InvalidUrl("SPOTIFY_API_AUTH_URL"))?;

        let tls_cert_path = get("TLS_CERT_PATH").map(PathBuf::from);
        let tls_key_path = get("TLS_KEY_PATH").map(PathBuf::from);
        if tls_cert_path.is_some() != tls_key_path.is_some() {
            return Err(ConfigError::IncompleteTls);
        }

        Ok(Self {
            client_id: required("CLIENT_ID", "SPOTIPY_CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET", "SPOTIPY_CLIENT_SECRET")?,
            redirect_uri: required("REDIRECT_URI", "SPOTIPY_REDIRECT_URI")?,
            scope: or_default("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SCOPE),
            auth_url,
            token_url: or_default("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: or_default("SPOTIFY_API_URL", DEFAULT_API_URL)
                .trim_end_matches('/')
                .to_string(),
            server_addr,
            token_cache_path: PathBuf::from(or_default(
                "TOKEN_CACHE_PATH",
                DEFAULT_TOKEN_CACHE_PATH,
            )),
            static_dir: PathBuf::from(or_default("STATIC_DIR", DEFAULT_STATIC_DIR)),
            tls_cert_path,
            tls_key_path,
        })
    }

    /// Address printed for humans; `0.0.0.0` is shown as `localhost`.
    pub fn public_base_url(&self) -> String {
        let host = if self.server_addr.ip().is_unspecified() {
            "localhost".to_string()
        } else {
            self.server_addr.ip().to_string()
        };
        format!("https://{}:{}", host, self.server_addr.port())
    }
}
