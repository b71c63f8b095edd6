//! OAuth grant flows
//!
//! Refresh grants run against the token endpoint recorded in the
//! credential record. Interactive consent is the auth-code + PKCE flow
//! for installed applications: a one-shot loopback listener receives the
//! redirect while the system browser shows the consent screen.

use crate::auth::token::{default_auth_uri, default_token_uri, ClientSecrets, StoredToken};
use crate::utils::error::AuthError;
use chrono::{Duration, Utc};
use oauth2::basic::{BasicClient, BasicTokenResponse};
use oauth2::{
    AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken, EndpointNotSet, EndpointSet,
    PkceCodeChallenge, RedirectUrl, RefreshToken, Scope, TokenResponse, TokenUrl,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, info, warn};
use url::Url;

/// Permissions requested on consent.
pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/youtube.force-ssl"];

type ConfiguredClient =
    BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

fn oauth_client(
    client_id: &str,
    client_secret: &str,
    auth_uri: &str,
    token_uri: &str,
) -> Result<ConfiguredClient, AuthError> {
    Ok(BasicClient::new(ClientId::new(client_id.to_string()))
        .set_client_secret(ClientSecret::new(client_secret.to_string()))
        .set_auth_uri(AuthUrl::new(auth_uri.to_string()).map_err(endpoint_error)?)
        .set_token_uri(TokenUrl::new(token_uri.to_string()).map_err(endpoint_error)?))
}

fn endpoint_error(e: url::ParseError) -> AuthError {
    AuthError::Endpoint(e.to_string())
}

/// Token endpoint calls must not follow redirects.
fn http_client() -> Result<reqwest::Client, AuthError> {
    Ok(reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

fn stored_from_response(
    response: &BasicTokenResponse,
    client_id: &str,
    client_secret: &str,
    fallback_refresh: Option<&str>,
) -> StoredToken {
    StoredToken {
        access_token: response.access_token().secret().clone(),
        // The token endpoint omits the refresh token on refresh grants;
        // carry the one we already hold forward in that case.
        refresh_token: response
            .refresh_token()
            .map(|t| t.secret().clone())
            .or_else(|| fallback_refresh.map(str::to_owned)),
        client_id: Some(client_id.to_string()),
        client_secret: Some(client_secret.to_string()),
        expiry: response
            .expires_in()
            .map(|d| Utc::now() + Duration::seconds(d.as_secs() as i64)),
        scopes: response
            .scopes()
            .map(|scopes| scopes.iter().map(|s| s.to_string()).collect())
            .unwrap_or_default(),
    }
}

/// Renew an expired record with its refresh token.
pub async fn refresh(token: &StoredToken) -> Result<StoredToken, AuthError> {
    let (Some(refresh_token), Some(client_id), Some(client_secret)) = (
        token.refresh_token.as_deref(),
        token.client_id.as_deref(),
        token.client_secret.as_deref(),
    ) else {
        return Err(AuthError::Refresh(
            "credential record is missing refresh metadata".to_string(),
        ));
    };

    let client = oauth_client(
        client_id,
        client_secret,
        &default_auth_uri(),
        &default_token_uri(),
    )?;
    let http = http_client()?;

    debug!("refreshing access token");
    let response = client
        .exchange_refresh_token(&RefreshToken::new(refresh_token.to_string()))
        .request_async(&http)
        .await
        .map_err(|e| AuthError::Refresh(e.to_string()))?;

    Ok(stored_from_response(
        &response,
        client_id,
        client_secret,
        Some(refresh_token),
    ))
}

/// Run the interactive consent flow and return the granted record.
pub async fn interactive_consent(secrets: &ClientSecrets) -> Result<StoredToken, AuthError> {
    let listener = TcpListener::bind(("127.0.0.1", 0)).await?;
    let port = listener.local_addr()?.port();
    let redirect_uri = format!("http://127.0.0.1:{port}");

    let client = oauth_client(
        &secrets.client_id,
        &secrets.client_secret,
        &secrets.auth_uri,
        &secrets.token_uri,
    )?
    .set_redirect_uri(RedirectUrl::new(redirect_uri).map_err(endpoint_error)?);

    let (pkce_challenge, pkce_verifier) = PkceCodeChallenge::new_random_sha256();
    let (auth_url, csrf_token) = client
        .authorize_url(CsrfToken::new_random)
        .add_scopes(SCOPES.iter().map(|s| Scope::new((*s).to_string())))
        .set_pkce_challenge(pkce_challenge)
        .url();

    info!("waiting for authorization in the browser");
    if open::that(auth_url.as_str()).is_err() {
        eprintln!("Open this URL in a browser to authorize access:\n{auth_url}");
    }

    let (code, state) = wait_for_redirect(&listener).await?;
    if state != *csrf_token.secret() {
        return Err(AuthError::Consent(
            "state mismatch in authorization redirect".to_string(),
        ));
    }

    let http = http_client()?;
    let response = client
        .exchange_code(AuthorizationCode::new(code))
        .set_pkce_verifier(pkce_verifier)
        .request_async(&http)
        .await
        .map_err(|e| AuthError::Consent(e.to_string()))?;

    Ok(stored_from_response(
        &response,
        &secrets.client_id,
        &secrets.client_secret,
        None,
    ))
}

/// What a single HTTP request to the loopback listener amounted to.
#[derive(Debug, PartialEq, Eq)]
enum Redirect {
    Granted { code: String, state: String },
    Denied(String),
    Unrelated,
}

/// Accept connections until the authorization redirect arrives.
async fn wait_for_redirect(listener: &TcpListener) -> Result<(String, String), AuthError> {
    loop {
        let (mut stream, _) = listener.accept().await?;
        let mut buf = vec![0u8; 4096];
        let n = stream.read(&mut buf).await?;
        let request = String::from_utf8_lossy(&buf[..n]).into_owned();

        match parse_redirect(&request) {
            Redirect::Granted { code, state } => {
                respond(
                    &mut stream,
                    "200 OK",
                    "Authorization complete. You can close this tab.",
                )
                .await;
                return Ok((code, state));
            }
            Redirect::Denied(reason) => {
                respond(&mut stream, "200 OK", "Authorization was denied.").await;
                return Err(AuthError::Consent(format!(
                    "authorization denied: {reason}"
                )));
            }
            // Browsers also ask for /favicon.ico and the like.
            Redirect::Unrelated => {
                debug!("ignoring unrelated request on the redirect listener");
                respond(&mut stream, "404 Not Found", "").await;
            }
        }
    }
}

fn parse_redirect(request: &str) -> Redirect {
    let Some(path) = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
    else {
        return Redirect::Unrelated;
    };

    let Ok(url) = Url::parse(&format!("http://127.0.0.1{path}")) else {
        return Redirect::Unrelated;
    };

    let mut code = None;
    let mut state = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" => code = Some(value.into_owned()),
            "state" => state = Some(value.into_owned()),
            "error" => return Redirect::Denied(value.into_owned()),
            _ => {}
        }
    }

    match (code, state) {
        (Some(code), Some(state)) => Redirect::Granted { code, state },
        _ => Redirect::Unrelated,
    }
}

async fn respond(stream: &mut TcpStream, status: &str, body: &str) {
    let reply = format!(
        "HTTP/1.1 {status}\r\nContent-Type: text/html\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    if let Err(e) = stream.write_all(reply.as_bytes()).await {
        warn!("failed to answer redirect request: {}", e);
    }
}
