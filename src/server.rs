use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use axum_server::{Handle, tls_rustls::RustlsConfig};
use rcgen::CertifiedKey;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{Res, api, config::Config, info, management::OAuthManager};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub oauth: Arc<OAuthManager>,
    pub static_dir: PathBuf,
}

impl AppState {
    pub fn new(oauth: Arc<OAuthManager>, static_dir: impl Into<PathBuf>) -> Self {
        Self {
            oauth,
            static_dir: static_dir.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let assets = ServeDir::new(&state.static_dir);

    Router::new()
        .route("/", get(api::index))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/current-song", get(api::current_song))
        .route("/health", get(api::health))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the router over HTTPS until Ctrl-C.
///
/// Uses the PEM files from the configuration when both are set, otherwise
/// a self-signed certificate for `localhost` generated at startup.
pub async fn start_api_server(config: &Config, state: AppState) -> Res<()> {
    let tls = tls_config(config).await?;

    let handle = Handle::new();
    tokio::spawn(shutdown_signal(handle.clone()));

    axum_server::bind_rustls(config.server_addr, tls)
        .handle(handle)
        .serve(router(state).into_make_service())
        .await?;

    Ok(())
}

async fn tls_config(config: &Config) -> Res<RustlsConfig> {
    // reqwest and axum-server can pull in different rustls backends
    let _ = rustls::crypto::ring::default_provider().install_default();

    if let (Some(cert), Some(key)) = (&config.tls_cert_path, &config.tls_key_path) {
        return Ok(RustlsConfig::from_pem_file(cert, key).await?);
    }

    let CertifiedKey { cert, key_pair } =
        rcgen::generate_simple_self_signed(vec!["localhost".to_string(), "127.0.0.1".to_string()])?;
    let tls = RustlsConfig::from_pem(
        cert.pem().into_bytes(),
        key_pair.serialize_pem().into_bytes(),
    )
    .await?;

    Ok(tls)
}

async fn shutdown_signal(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down...");
        handle.graceful_shutdown(Some(Duration::from_secs(5)));
    }
}
