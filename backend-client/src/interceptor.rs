use std::sync::Arc;

use mcpanel_notify::NotifierHandle;
use mcpanel_protocol::envelope::Envelope;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::navigator::SessionExpiryPolicy;
use crate::transport::ApiRequest;
use crate::transport::RawResponse;
use crate::transport::Transport;

/// Notification key raised when the liveness check fails.
pub const SERVER_UNREACHABLE: &str = "server.unreachable";

/// Single place where backend responses are turned into results.
///
/// | response                    | outcome                                  |
/// |-----------------------------|------------------------------------------|
/// | no response                 | [`ApiError::Unreachable`]                |
/// | 401                         | login redirect, [`ApiError::SessionExpired`] |
/// | 204                         | `Ok(None)`, body ignored                 |
/// | other 4xx                   | [`ApiError::ClientError`], envelope message kept if any |
/// | envelope, `success: true`   | `Ok(result)`                             |
/// | envelope, `success: false`  | [`ApiError::RemoteFailure`]              |
/// | 5xx without an envelope     | [`ApiError::ServerError`]                |
/// | anything else               | [`ApiError::InvalidBody`]                |
#[derive(Clone)]
pub struct ResponseInterceptor {
    transport: Arc<dyn Transport>,
    session_policy: Option<SessionExpiryPolicy>,
    notifier: Option<NotifierHandle>,
}

impl ResponseInterceptor {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            session_policy: None,
            notifier: None,
        }
    }

    #[must_use]
    pub fn with_session_policy(mut self, policy: SessionExpiryPolicy) -> Self {
        self.session_policy = Some(policy);
        self
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: NotifierHandle) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn notifier(&self) -> Option<&NotifierHandle> {
        self.notifier.as_ref()
    }

    /// Sends `request` and classifies the response. `Ok(None)` means the
    /// call succeeded without a result (204, or an envelope with no
    /// `result`).
    pub async fn exchange<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Option<T>, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("{method} {url} got no response: {err}");
                return Err(ApiError::Unreachable(err));
            }
        };
        tracing::debug!(status = response.status, "{method} {url}");
        self.classify(response)
    }

    fn classify<T: DeserializeOwned>(&self, response: RawResponse) -> Result<Option<T>, ApiError> {
        let RawResponse { status, body } = response;
        match status {
            401 => {
                if let Some(policy) = &self.session_policy {
                    policy.on_session_expired();
                }
                Err(ApiError::SessionExpired { body })
            }
            204 => Ok(None),
            400..=499 => Err(ApiError::ClientError {
                status,
                message: serde_json::from_str::<Envelope<serde_json::Value>>(&body)
                    .ok()
                    .and_then(|envelope| envelope.message),
            }),
            _ => match serde_json::from_str::<Envelope<T>>(&body) {
                Ok(envelope) if envelope.success => Ok(envelope.result),
                Ok(envelope) => Err(ApiError::RemoteFailure {
                    message: envelope.message,
                    cause: envelope.cause,
                }),
                Err(_) if status >= 500 => Err(ApiError::ServerError { status }),
                Err(source) => Err(ApiError::InvalidBody { status, source }),
            },
        }
    }

    /// Liveness probe: true when `url` answers with anything below 500,
    /// whatever the body (the backend replies with plain text). On failure
    /// an urgent [`SERVER_UNREACHABLE`] notification is raised.
    pub async fn ping(&self, url: &str) -> bool {
        let alive = match self.transport.execute(ApiRequest::get(url)).await {
            Ok(response) if response.status >= 500 => {
                tracing::debug!("ping {url} answered {}", response.status);
                false
            }
            Ok(_) => true,
            Err(err) => {
                tracing::debug!("ping {url} failed: {err}");
                false
            }
        };
        if !alive {
            tracing::warn!("backend at {url} is not answering");
            if let Some(notifier) = &self.notifier {
                notifier.alert(SERVER_UNREACHABLE);
            }
        }
        alive
    }
}

impl std::fmt::Debug for ResponseInterceptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseInterceptor")
            .field("session_policy", &self.session_policy)
            .field("notifier", &self.notifier.is_some())
            .finish_non_exhaustive()
    }
}
