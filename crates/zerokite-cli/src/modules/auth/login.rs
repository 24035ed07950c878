use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use tracing::{info, warn};
use zerokite_core::{ApiBody, ApiError, Credentials, RedirectTarget, Session, SESSION_TOKEN_ROUTE};
use zerokite_crypto::session_checksum;

use super::capture::{Fulfillment, RedirectCapture};
use crate::errors::CliError;
use crate::modules::system::{ApiClient, ApiRequest};

pub(crate) struct LoginOptions<'a> {
    pub port: u16,
    pub redirect_url: Option<&'a str>,
    pub credentials: Credentials,
    pub login_base: &'a str,
    pub timeout: Duration,
}

/// What the operator needs to see once the callback listener is up.
#[derive(Debug, Clone)]
pub(crate) struct ListenNotice {
    pub listen_url: String,
    pub all_interfaces: bool,
    pub login_url: String,
    pub redirect_url: String,
}

pub(crate) fn login_url(login_base: &str, api_key: &str) -> String {
    format!("{login_base}?v=3&api_key={}", urlencoding::encode(api_key))
}

/// Runs one handshake: validate the redirect target, listen for the
/// redirect, exchange the request token and return the new session.
///
/// Configuration is checked before anything is bound. `on_listening` runs
/// once the listener is up and before the timeout starts counting.
pub(crate) async fn login<N>(
    api: &ApiClient,
    options: LoginOptions<'_>,
    on_listening: N,
) -> Result<Session, CliError>
where
    N: FnOnce(&ListenNotice),
{
    let LoginOptions {
        port,
        redirect_url,
        credentials,
        login_base,
        timeout,
    } = options;

    let target = RedirectTarget::for_port(redirect_url, port)?;
    let capture = RedirectCapture::bind(target.bind_addr(), target.path.clone(), timeout).await?;

    let all_interfaces = !target.is_loopback();
    if all_interfaces {
        warn!(host = %target.host, "redirect host is not loopback; accepting callbacks on all interfaces");
    }
    let notice = ListenNotice {
        listen_url: format!("http://{}{}", capture.local_addr(), target.path),
        all_interfaces,
        login_url: login_url(login_base, &credentials.api_key),
        redirect_url: redirect_url.unwrap_or_default().trim().to_string(),
    };
    on_listening(&notice);

    capture
        .run(SessionExchange {
            api: api.clone(),
            credentials,
        })
        .await
}

/// Trades the captured request token for a session while the browser waits.
struct SessionExchange {
    api: ApiClient,
    credentials: Credentials,
}

#[async_trait]
impl Fulfillment for SessionExchange {
    type Output = Session;

    async fn fulfill(&self, request_token: &str) -> Result<Session, CliError> {
        exchange_request_token(&self.api, &self.credentials, request_token).await
    }
}

pub(crate) async fn exchange_request_token(
    api: &ApiClient,
    credentials: &Credentials,
    request_token: &str,
) -> Result<Session, CliError> {
    let checksum = session_checksum(&credentials.api_key, request_token, &credentials.api_secret);
    let request = ApiRequest::new(Method::POST, SESSION_TOKEN_ROUTE, &credentials.api_key)
        .param("api_key", credentials.api_key.as_str())
        .param("request_token", request_token)
        .param("checksum", checksum);
    let data = api.call(request).await?.into_json();

    let session = Session::from_token_data(&credentials.api_key, &data, Utc::now()).ok_or_else(
        || {
            ApiError::invalid_response(
                "Did not receive access_token from Kite API.",
                Some(ApiBody::Structured(data.clone())),
            )
        },
    )?;
    info!(user_id = ?session.user_id, "session established");
    Ok(session)
}
