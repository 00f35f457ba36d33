use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    config::Config,
    error::AppError,
    types::{TokenErrorResponse, TokenInfo, TokenResponse},
    utils,
};

/// Builds the URL the browser is sent to for user consent.
///
/// The URL carries the client id, redirect URI and requested scope, asks
/// for an authorization code and sets `show_dialog=true` so the consent
/// screen is shown even when the user approved the app before. The result
/// only depends on the configuration.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config);
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn authorize_url(config: &Config) -> String {
    let mut url = config.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("client_id", &config.client_id)
        .append_pair("response_type", "code")
        .append_pair("redirect_uri", &config.redirect_uri)
        .append_pair("scope", &config.scope)
        .append_pair("show_dialog", "true");
    url.into()
}

/// Exchanges an authorization code for a token.
///
/// Completes the authorization code flow by posting the code received on
/// the callback to the token endpoint, authenticated with the client
/// credentials.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `config` - Client credentials and token endpoint
/// * `code` - Authorization code received from the OAuth callback
///
/// # Errors
///
/// Returns [`AppError::Upstream`] when the request fails, the endpoint
/// rejects the code, or the response carries no refresh token.
pub async fn exchange_code(
    client: &Client,
    config: &Config,
    code: &str,
) -> Result<TokenInfo, AppError> {
    let response = request_token(
        client,
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .await?;

    into_token_info(response, None, config, utils::now_timestamp())
}

/// Refreshes an access token with the `refresh_token` grant.
///
/// The accounts service may or may not rotate the refresh token. When the
/// response carries none, the previous one is kept, together with the
/// previous scope if the response omits it.
///
/// # Errors
///
/// Returns [`AppError::Upstream`] on network failures and when the refresh
/// token was revoked or has expired.
pub async fn refresh_token(
    client: &Client,
    config: &Config,
    previous: &TokenInfo,
) -> Result<TokenInfo, AppError> {
    let response = request_token(
        client,
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", previous.refresh_token.as_str()),
        ],
    )
    .await?;

    into_token_info(response, Some(previous), config, utils::now_timestamp())
}

async fn request_token(
    client: &Client,
    config: &Config,
    form: &[(&str, &str)],
) -> Result<TokenResponse, AppError> {
    let res = client
        .post(&config.token_url)
        .header(
            AUTHORIZATION,
            utils::basic_auth_header(&config.client_id, &config.client_secret),
        )
        .form(form)
        .send()
        .await?;

    let status = res.status();
    if !status.is_success() {
        let detail = match res.json::<TokenErrorResponse>().await {
            Ok(body) => match body.error_description {
                Some(description) => format!("{} ({})", body.error, description),
                None => body.error,
            },
            Err(_) => "no error details".to_string(),
        };
        return Err(AppError::Upstream(format!(
            "token endpoint returned {}: {}",
            status, detail
        )));
    }

    Ok(res.json::<TokenResponse>().await?)
}

fn into_token_info(
    response: TokenResponse,
    previous: Option<&TokenInfo>,
    config: &Config,
    now: i64,
) -> Result<TokenInfo, AppError> {
    let refresh_token = match (response.refresh_token, previous) {
        (Some(token), _) => token,
        (None, Some(prev)) => prev.refresh_token.clone(),
        (None, None) => {
            return Err(AppError::Upstream(
                "token endpoint did not return a refresh token".to_string(),
            ));
        }
    };

    let scope = response
        .scope
        .or_else(|| previous.map(|p| p.scope.clone()))
        .unwrap_or_else(|| config.scope.clone());

    Ok(TokenInfo {
        access_token: response.access_token,
        refresh_token,
        expires_at: now.saturating_add(response.expires_in),
        scope,
        token_type: response.token_type.unwrap_or_else(|| "Bearer".to_string()),
    })
}
