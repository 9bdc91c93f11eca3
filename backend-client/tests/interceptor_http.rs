#![allow(clippy::unwrap_used)]

use std::net::TcpListener;
use std::sync::Arc;

use mcpanel_backend_client::ApiError;
use mcpanel_backend_client::ApiRequest;
use mcpanel_backend_client::MemoryNavigator;
use mcpanel_backend_client::Navigator;
use mcpanel_backend_client::ReqwestTransport;
use mcpanel_backend_client::ResponseInterceptor;
use mcpanel_backend_client::SERVER_UNREACHABLE;
use mcpanel_backend_client::SessionExpiryPolicy;
use mcpanel_backend_client::TransportOptions;
use mcpanel_notify::NotificationCenter;
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::header;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn interceptor_at(route: &str) -> (ResponseInterceptor, Arc<MemoryNavigator>) {
    let transport = ReqwestTransport::new(TransportOptions::default()).unwrap();
    let navigator = Arc::new(MemoryNavigator::new(route));
    let interceptor = ResponseInterceptor::new(Arc::new(transport))
        .with_session_policy(SessionExpiryPolicy::new(navigator.clone()));
    (interceptor, navigator)
}

/// Address nothing is listening on.
fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[tokio::test]
async fn session_expiry_redirects_once_and_rejects() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(401).set_body_string("jwt expired"))
        .expect(2)
        .mount(&server)
        .await;

    let (interceptor, navigator) = interceptor_at("/dashboard");
    let url = format!("{}/api/v1/user", server.uri());

    let first = interceptor
        .exchange::<serde_json::Value>(ApiRequest::get(url.clone()))
        .await
        .unwrap_err();
    assert!(matches!(first, ApiError::SessionExpired { ref body } if body == "jwt expired"));
    assert_eq!(navigator.current_route(), "/login?next=/dashboard");

    // Now on the login route: the second 401 must not navigate again.
    let second = interceptor
        .exchange::<serde_json::Value>(ApiRequest::get(url))
        .await
        .unwrap_err();
    assert!(matches!(second, ApiError::SessionExpired { .. }));
    assert_eq!(
        navigator.replaced_routes(),
        vec!["/login?next=/dashboard".to_string()]
    );
}

#[tokio::test]
async fn no_content_resolves_empty() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/instance/lobby"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (interceptor, _) = interceptor_at("/");
    let result = interceptor
        .exchange::<serde_json::Value>(ApiRequest::delete(format!(
            "{}/api/v1/instance/lobby",
            server.uri()
        )))
        .await
        .unwrap();
    assert_eq!(result, None);
}

#[tokio::test]
async fn failure_envelope_with_ok_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "auth.invalid"})),
        )
        .mount(&server)
        .await;

    let (interceptor, _) = interceptor_at("/login");
    let err = interceptor
        .exchange::<serde_json::Value>(
            ApiRequest::post_json(
                format!("{}/api/v1/auth/login", server.uri()),
                &json!({"username": "admin", "password": "nope", "set": true}),
            )
            .unwrap(),
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::RemoteFailure { message: Some(ref m), cause: None } if m == "auth.invalid"
    ));
}

#[tokio::test]
async fn client_error_is_not_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/instance/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not json"))
        .mount(&server)
        .await;

    let (interceptor, navigator) = interceptor_at("/instances");
    let err = interceptor
        .exchange::<serde_json::Value>(ApiRequest::get(format!(
            "{}/api/v1/instance/missing",
            server.uri()
        )))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::ClientError { status: 404, message: None }));
    assert_eq!(navigator.replaced_routes(), Vec::<String>::new());
}

#[tokio::test]
async fn requests_are_sent_uncached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/info"))
        .and(header("cache-control", "no-cache"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "result": {}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (interceptor, _) = interceptor_at("/");
    let result = interceptor
        .exchange::<serde_json::Value>(ApiRequest::get(format!("{}/api/v1/info", server.uri())))
        .await
        .unwrap();
    assert_eq!(result, Some(json!({})));
}

#[tokio::test]
async fn closed_port_is_unreachable() {
    let (interceptor, navigator) = interceptor_at("/dashboard");
    let err = interceptor
        .exchange::<serde_json::Value>(ApiRequest::get(format!(
            "{}/api/v1/user",
            closed_port_url()
        )))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Unreachable(_)));
    assert_eq!(navigator.replaced_routes(), Vec::<String>::new());
}

#[tokio::test]
async fn ping_against_live_and_dead_backends() {
    let center = NotificationCenter::spawn();
    let notifier = center.handle();

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/auth/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Hi"))
        .mount(&server)
        .await;

    let (interceptor, _) = interceptor_at("/");
    let interceptor = interceptor.with_notifier(notifier.clone());

    assert!(
        interceptor
            .ping(&format!("{}/api/v1/auth/ping", server.uri()))
            .await
    );
    assert_eq!(notifier.current(), None);

    assert!(
        !interceptor
            .ping(&format!("{}/api/v1/auth/ping", closed_port_url()))
            .await
    );
    assert_eq!(
        notifier.current().map(|shown| shown.message.text),
        Some(SERVER_UNREACHABLE.to_string())
    );
}
