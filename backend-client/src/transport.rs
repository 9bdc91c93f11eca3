use std::fmt;
use std::time::Duration;

use reqwest::header::CACHE_CONTROL;
use reqwest::header::CONTENT_TYPE;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Serialize;

use crate::error::TransportError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Description of one outbound call. `body`, when present, is JSON.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::Get, url)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new(Method::Delete, url)
    }

    pub fn post_json<B: Serialize>(url: impl Into<String>, body: &B) -> serde_json::Result<Self> {
        Ok(Self::new(Method::Post, url).with_body(serde_json::to_string(body)?))
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Status and body of whatever the server answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Moves an [`ApiRequest`] over the wire.
///
/// Implementations must only fail when no response was received at all;
/// every HTTP status, including errors, is an `Ok`.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

#[derive(Clone, Debug, Default)]
pub struct TransportOptions {
    pub user_agent: Option<String>,
    pub timeout: Option<Duration>,
}

/// [`Transport`] backed by a `reqwest` client that keeps the session cookie
/// between calls, never serves cached responses, and follows redirects.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(options: TransportOptions) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));

        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(10));
        if let Some(ua) = options.user_agent {
            builder = builder.user_agent(ua);
        }
        if let Some(timeout) = options.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(TransportError::Build)?;
        Ok(Self { http })
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut req = self.http.request(method.into(), &url);
        for (name, value) in headers {
            req = req.header(name, value);
        }
        if let Some(body) = body {
            req = req
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(body);
        }

        let res = req.send().await.map_err(|e| TransportError::NoResponse {
            url: url.clone(),
            message: e.to_string(),
        })?;
        let status = res.status().as_u16();
        let body = res.text().await.map_err(|e| TransportError::NoResponse {
            url: url.clone(),
            message: format!("failed to read body: {e}"),
        })?;
        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Serialize)]
    struct Payload {
        name: &'static str,
    }

    #[test]
    fn post_json_encodes_body() {
        let request = ApiRequest::post_json("http://h/api", &Payload { name: "lobby" })
            .map(|r| r.with_header("X-Trace", "1"));
        assert_eq!(
            request.ok(),
            Some(ApiRequest {
                method: Method::Post,
                url: "http://h/api".to_string(),
                headers: vec![("X-Trace".to_string(), "1".to_string())],
                body: Some(r#"{"name":"lobby"}"#.to_string()),
            })
        );
    }

    #[test]
    fn method_display_matches_http_verbs() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(reqwest::Method::from(Method::Put), reqwest::Method::PUT);
    }
}
