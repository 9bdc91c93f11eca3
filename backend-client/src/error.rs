use thiserror::Error;

/// The request never produced an HTTP response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to build http client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("no response from {url}: {message}")]
    NoResponse { url: String, message: String },
}

/// Classified outcome of a failed backend call.
///
/// None of these are retried; deciding whether to try again, or whether to
/// tell the user, is up to the caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP 401. The login redirect has already been attempted when this is
    /// returned.
    #[error("session expired")]
    SessionExpired { body: String },

    /// Any other 4xx status. `message` is the envelope message when the
    /// body carries one.
    #[error("request rejected with status {status}")]
    ClientError {
        status: u16,
        message: Option<String>,
    },

    /// The backend answered with `success: false`.
    #[error("remote failure: {}", .message.as_deref().unwrap_or("unspecified"))]
    RemoteFailure {
        message: Option<String>,
        cause: Option<String>,
    },

    /// 5xx whose body is not an envelope.
    #[error("server error (status {status})")]
    ServerError { status: u16 },

    #[error("backend unreachable: {0}")]
    Unreachable(#[from] TransportError),

    #[error("undecodable response body (status {status}): {source}")]
    InvalidBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A successful envelope without the `result` the endpoint promises.
    #[error("response carried no result")]
    MissingResult,
}

impl ApiError {
    /// Localisation key suitable for a user-facing notification.
    pub fn notification_key(&self) -> &str {
        match self {
            ApiError::SessionExpired { .. } => "auth.expired",
            ApiError::ClientError { .. } => "request.rejected",
            ApiError::RemoteFailure {
                message: Some(message),
                ..
            } => message,
            ApiError::RemoteFailure { message: None, .. } => "_",
            ApiError::ServerError { .. } | ApiError::Unreachable(_) => "server.unreachable",
            ApiError::InvalidBody { .. } | ApiError::Encode(_) | ApiError::MissingResult => "_",
        }
    }
}
