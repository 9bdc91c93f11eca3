use serde::Deserialize;
use serde::Serialize;

/// Structured body returned by every `/api/v1` endpoint.
///
/// `result` is set when `success` is true; `message` (usually a
/// localisation key such as `auth.invalid`) and `cause` are set when it is
/// false. The backend names the cause field `err_cause`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(default = "none", skip_serializing_if = "Option::is_none")]
    pub result: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(
        default,
        rename = "err_cause",
        alias = "cause",
        skip_serializing_if = "Option::is_none"
    )]
    pub cause: Option<String>,
}

// `#[serde(default)]` on a generic field would require `T: Default`.
fn none<T>() -> Option<T> {
    None
}

impl<T> Envelope<T> {
    pub fn success(result: T) -> Self {
        Self {
            success: true,
            result: Some(result),
            message: None,
            cause: None,
        }
    }

    pub fn failure(message: impl Into<String>, cause: Option<String>) -> Self {
        Self {
            success: false,
            result: None,
            message: Some(message.into()),
            cause,
        }
    }
}
