use mcpanel_protocol::models::Instance;
use mcpanel_protocol::models::InstanceType;
use mcpanel_protocol::models::LoginRequest;
use mcpanel_protocol::models::NewInstanceRequest;
use mcpanel_protocol::models::SystemInfo;
use mcpanel_protocol::models::User;
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::interceptor::ResponseInterceptor;
use crate::transport::ApiRequest;

const API_PREFIX: &str = "/api/v1";

/// Localisation key used when the backend refuses a login without saying why.
const AUTH_INVALID: &str = "auth.invalid";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// The session cookie has been set.
    Success,
    /// Credentials refused; carries the localisation key to show.
    Rejected(String),
}

/// Typed view of the panel's `/api/v1` endpoints. Every call goes through
/// the [`ResponseInterceptor`], so session expiry and error classification
/// behave the same everywhere.
#[derive(Clone, Debug)]
pub struct BackendClient {
    base_url: String,
    interceptor: ResponseInterceptor,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>, interceptor: ResponseInterceptor) -> Self {
        let mut base_url = base_url.into();
        // Trim trailing slashes for consistent URL building.
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            interceptor,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn interceptor(&self) -> &ResponseInterceptor {
        &self.interceptor
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    async fn fetch<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
        self.interceptor
            .exchange(request)
            .await?
            .ok_or(ApiError::MissingResult)
    }

    /// Checks that the backend answers at all. See
    /// [`ResponseInterceptor::ping`].
    pub async fn ping(&self) -> bool {
        self.interceptor.ping(&self.url("/auth/ping")).await
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome, ApiError> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
            set: true,
        };
        let request =
            ApiRequest::post_json(self.url("/auth/login"), &payload).map_err(ApiError::Encode)?;
        match self.interceptor.exchange::<serde_json::Value>(request).await {
            Ok(_) => Ok(LoginOutcome::Success),
            Err(ApiError::RemoteFailure { message, .. }) => Ok(LoginOutcome::Rejected(
                message.unwrap_or_else(|| AUTH_INVALID.to_string()),
            )),
            Err(ApiError::ClientError {
                status: 403,
                message,
            }) => Ok(LoginOutcome::Rejected(
                message.unwrap_or_else(|| AUTH_INVALID.to_string()),
            )),
            Err(err) => Err(err),
        }
    }

    /// Ends the session and tells the user about it.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.interceptor
            .exchange::<serde_json::Value>(ApiRequest::get(self.url("/auth/logout")))
            .await?;
        if let Some(notifier) = self.interceptor.notifier() {
            notifier.notify_fast("auth.logout");
        }
        Ok(())
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.fetch(ApiRequest::get(self.url("/user"))).await
    }

    pub async fn list_instances(&self) -> Result<Vec<String>, ApiError> {
        self.fetch(ApiRequest::get(self.url("/instance/"))).await
    }

    pub async fn instance(&self, name: &str) -> Result<Instance, ApiError> {
        self.fetch(ApiRequest::get(self.instance_url(name))).await
    }

    pub async fn create_instance(
        &self,
        name: &str,
        typ: InstanceType,
        version: &str,
    ) -> Result<Instance, ApiError> {
        let payload = NewInstanceRequest {
            typ,
            version: version.to_string(),
        };
        let request =
            ApiRequest::post_json(self.instance_url(name), &payload).map_err(ApiError::Encode)?;
        self.fetch(request).await
    }

    pub async fn delete_instance(&self, name: &str) -> Result<(), ApiError> {
        self.interceptor
            .exchange::<serde_json::Value>(ApiRequest::delete(self.instance_url(name)))
            .await?;
        Ok(())
    }

    pub async fn system_info(&self) -> Result<SystemInfo, ApiError> {
        self.fetch(ApiRequest::get(self.url("/info"))).await
    }

    fn instance_url(&self, name: &str) -> String {
        self.url(&format!("/instance/{}", urlencoding::encode(name)))
    }
}
