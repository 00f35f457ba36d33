use std::sync::Arc;

use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use reqwest::Client;
use tracing_subscriber::EnvFilter;

use nowplaying::{
    config::{self, Config},
    error, info,
    management::{AuthState, FileTokenStore, OAuthManager},
    server::{self, AppState},
    success, utils, warning,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

/// Everything is configured through the environment (see `.env.example`).
#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();
    init_tracing();

    match config::load_env().await {
        Ok(Some(path)) => tracing::debug!(path = %path.display(), "loaded environment file"),
        Ok(None) => warning!("No .env file found, using the process environment."),
        Err(e) => error!("Cannot load environment. Err: {}", e),
    }

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => error!("Invalid configuration: {}", e),
    };

    let store = Arc::new(FileTokenStore::new(&config.token_cache_path));
    let oauth = Arc::new(OAuthManager::new(Arc::clone(&config), Client::new(), store));
    let base_url = config.public_base_url();

    warning!("Your browser will likely show a security warning for the self-signed certificate.");
    warning!("You will need to accept the risk or proceed anyway to continue.");
    info!("Visit {} in your browser.", base_url);

    match oauth.state().await {
        Ok(AuthState::Authenticated(session)) => success!(
            "Cached Spotify token found, valid for {} more seconds.",
            session.token.expires_at.saturating_sub(utils::now_timestamp())
        ),
        Ok(AuthState::Unauthenticated) => info!(
            "Authentication required. Please visit {}/login to authorize.",
            base_url
        ),
        Err(e) => warning!(
            "Cached token is unusable ({}). Please visit {}/login to authorize.",
            e,
            base_url
        ),
    }

    let state = AppState::new(oauth, config.static_dir.clone());
    if let Err(e) = server::start_api_server(&config, state).await {
        error!("Server stopped with an error: {}", e);
    }
}
