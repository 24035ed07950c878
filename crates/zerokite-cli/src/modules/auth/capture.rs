use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::errors::CliError;

pub(crate) const MISSING_REQUEST_TOKEN: &str = "Missing request_token in redirect callback.";
const LOGIN_NOT_SUCCESSFUL: &str = "Kite login did not return success status.";

/// How long a settled handshake waits for in-flight browser connections
/// before the server task is dropped outright.
const CLOSE_GRACE: Duration = Duration::from_secs(5);

/// Terminal outcome of one handshake attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum CaptureResult {
    Success { request_token: String },
    Rejected { reason: String },
    Timeout,
}

impl CaptureResult {
    /// Reads the redirect's query string the way the login page writes it:
    /// `status=success&request_token=...` or `status=<other>&error|message=...`.
    pub(crate) fn from_query(query: Option<&str>) -> Self {
        let mut status = None;
        let mut request_token = None;
        let mut error = None;
        let mut message = None;
        for (key, value) in url::form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            let slot = match key.as_ref() {
                "status" => &mut status,
                "request_token" => &mut request_token,
                "error" => &mut error,
                "message" => &mut message,
                _ => continue,
            };
            if slot.is_none() && !value.is_empty() {
                *slot = Some(value.into_owned());
            }
        }

        if let Some(status) = status.filter(|status| status != "success") {
            debug!(status = %status, "login page reported failure");
            return Self::Rejected {
                reason: error
                    .or(message)
                    .unwrap_or_else(|| LOGIN_NOT_SUCCESSFUL.to_string()),
            };
        }
        match request_token {
            Some(request_token) => Self::Success { request_token },
            None => Self::Rejected {
                reason: MISSING_REQUEST_TOKEN.to_string(),
            },
        }
    }

    /// Error reported when the handshake ends without a usable token.
    fn into_error(self) -> CliError {
        match self {
            Self::Rejected { reason } => CliError::HandshakeRejected(reason),
            Self::Timeout => CliError::HandshakeTimeout,
            Self::Success { .. } => CliError::CaptureAborted,
        }
    }
}

/// Work run on the captured request token before the browser gets its
/// answer. Its failure becomes the handshake's failure.
#[async_trait]
pub(crate) trait Fulfillment: Send + Sync + 'static {
    type Output: Send + 'static;

    async fn fulfill(&self, request_token: &str) -> Result<Self::Output, CliError>;
}

type Outcome<T> = Result<T, CliError>;

struct CaptureState<F: Fulfillment> {
    expected_path: String,
    fulfillment: F,
    settled: AtomicBool,
    outcome_tx: Mutex<Option<oneshot::Sender<Outcome<F::Output>>>>,
}

impl<F: Fulfillment> CaptureState<F> {
    /// True for exactly one caller per handshake.
    fn settle(&self) -> bool {
        !self.settled.swap(true, Ordering::AcqRel)
    }

    fn deliver(&self, outcome: Outcome<F::Output>) {
        let sender = match self.outcome_tx.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(sender) = sender {
            let _ = sender.send(outcome);
        }
    }
}

/// Ephemeral HTTP listener that waits for one login redirect.
///
/// The handshake settles exactly once, on the first matching callback or on
/// the timeout, whichever comes first. The listener is closed before
/// [`RedirectCapture::run`] returns, so the port can be bound again at once.
pub(crate) struct RedirectCapture {
    listener: TcpListener,
    local_addr: SocketAddr,
    expected_path: String,
    timeout: Duration,
}

impl RedirectCapture {
    pub(crate) async fn bind(
        addr: SocketAddr,
        expected_path: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CliError> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| CliError::Listen { addr, source })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| CliError::Listen { addr, source })?;
        let expected_path = expected_path.into();
        info!(%local_addr, path = %expected_path, "callback server listening");
        Ok(Self {
            listener,
            local_addr,
            expected_path,
            timeout,
        })
    }

    pub(crate) fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    pub(crate) async fn run<F: Fulfillment>(self, fulfillment: F) -> Outcome<F::Output> {
        let Self {
            listener,
            local_addr,
            expected_path,
            timeout,
        } = self;

        let (outcome_tx, mut outcome_rx) = oneshot::channel();
        let state = Arc::new(CaptureState {
            expected_path,
            fulfillment,
            settled: AtomicBool::new(false),
            outcome_tx: Mutex::new(Some(outcome_tx)),
        });
        let app = Router::new()
            .fallback(handle_callback::<F>)
            .with_state(Arc::clone(&state));

        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let mut server = tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await
        });

        let timer = tokio::time::sleep(timeout);
        tokio::pin!(timer);
        let received = tokio::select! {
            received = &mut outcome_rx => Some(received),
            () = &mut timer => None,
        };
        let outcome = match received {
            Some(received) => received.unwrap_or(Err(CliError::CaptureAborted)),
            None if state.settle() => {
                info!(?timeout, "no redirect received before timeout");
                Err(CaptureResult::Timeout.into_error())
            }
            // A callback claimed the handshake just before the timer fired.
            None => outcome_rx.await.unwrap_or(Err(CliError::CaptureAborted)),
        };

        let _ = shutdown_tx.send(());
        match tokio::time::timeout(CLOSE_GRACE, &mut server).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(err))) => warn!(error = %err, "callback server stopped with error"),
            Ok(Err(err)) => warn!(error = %err, "callback server task failed"),
            Err(_) => {
                warn!("callback server still draining connections; closing it");
                server.abort();
                let _ = server.await;
            }
        }
        info!(%local_addr, "callback server closed");
        outcome
    }
}

async fn handle_callback<F: Fulfillment>(
    State(state): State<Arc<CaptureState<F>>>,
    uri: Uri,
) -> Response {
    if uri.path() != state.expected_path {
        debug!(path = %uri.path(), "request outside callback path");
        return page(StatusCode::NOT_FOUND, "Not found");
    }
    if !state.settle() {
        warn!("ignoring callback after the login already settled");
        return page(
            StatusCode::CONFLICT,
            "Login already completed. You can close this window.",
        );
    }

    match CaptureResult::from_query(uri.query()) {
        CaptureResult::Success { request_token } => {
            info!("received request token; exchanging it for a session");
            // Outlives the connection: the outcome is delivered even if the
            // browser hangs up mid exchange.
            let exchange = tokio::spawn(fulfill_and_deliver(Arc::clone(&state), request_token));
            match exchange.await {
                Ok(response) => response,
                Err(err) => {
                    warn!(error = %err, "token exchange task failed");
                    page(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Token exchange failed. See CLI output.",
                    )
                }
            }
        }
        failure => {
            let body = match &failure {
                CaptureResult::Rejected { reason } if reason == MISSING_REQUEST_TOKEN => {
                    "Missing request_token in callback."
                }
                _ => "Login failed. You can close this window.",
            };
            warn!(result = ?failure, "login redirect rejected");
            state.deliver(Err(failure.into_error()));
            page(StatusCode::BAD_REQUEST, body)
        }
    }
}

async fn fulfill_and_deliver<F: Fulfillment>(
    state: Arc<CaptureState<F>>,
    request_token: String,
) -> Response {
    let outcome = state.fulfillment.fulfill(&request_token).await;
    let response = match &outcome {
        Ok(_) => page(
            StatusCode::OK,
            "Authentication successful. You can close this window.",
        ),
        Err(err) => {
            warn!(kind = err.kind(), error = %err, "token exchange failed");
            page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Token exchange failed. See CLI output.",
            )
        }
    };
    state.deliver(outcome);
    response
}

fn page(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CONNECTION, "close"),
        ],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_requires_token() {
        assert_eq!(
            CaptureResult::from_query(Some("status=success&request_token=tok123")),
            CaptureResult::Success {
                request_token: "tok123".to_string()
            }
        );
        assert_eq!(
            CaptureResult::from_query(Some("request_token=tok123")),
            CaptureResult::Success {
                request_token: "tok123".to_string()
            }
        );
        assert_eq!(
            CaptureResult::from_query(None),
            CaptureResult::Rejected {
                reason: MISSING_REQUEST_TOKEN.to_string()
            }
        );
        assert_eq!(
            CaptureResult::from_query(Some("status=success&request_token=")),
            CaptureResult::Rejected {
                reason: MISSING_REQUEST_TOKEN.to_string()
            }
        );
    }

    #[test]
    fn non_success_status_uses_error_then_message() {
        assert_eq!(
            CaptureResult::from_query(Some("status=cancelled&error=user%20denied&message=m")),
            CaptureResult::Rejected {
                reason: "user denied".to_string()
            }
        );
        assert_eq!(
            CaptureResult::from_query(Some("status=error&message=bad+login&request_token=t")),
            CaptureResult::Rejected {
                reason: "bad login".to_string()
            }
        );
        assert_eq!(
            CaptureResult::from_query(Some("status=error")),
            CaptureResult::Rejected {
                reason: LOGIN_NOT_SUCCESSFUL.to_string()
            }
        );
    }

    #[test]
    fn first_occurrence_of_a_parameter_wins() {
        assert_eq!(
            CaptureResult::from_query(Some("request_token=first&request_token=second")),
            CaptureResult::Success {
                request_token: "first".to_string()
            }
        );
    }
}
