#![allow(clippy::unwrap_used)]

use std::net::TcpListener;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::str::contains;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;

fn mcpanel(home: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("mcpanel").unwrap();
    cmd.env("MCPANEL_HOME", home)
        .env_remove("MCPANEL_BASE_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

#[test]
fn help_lists_subcommands() {
    let home = tempfile::tempdir().unwrap();
    mcpanel(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("instance"))
        .stdout(contains("whoami"));
}

#[test]
fn ping_dead_backend_fails_with_notification() {
    let home = tempfile::tempdir().unwrap();
    mcpanel(home.path())
        .args(["ping", "--base-url", &closed_port_url()])
        .assert()
        .failure()
        .stderr(contains("[warning] Could not reach the server"));
}

#[test]
fn malformed_config_is_reported() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.toml"), "base_url = 42").unwrap();
    mcpanel(home.path())
        .arg("ping")
        .assert()
        .failure()
        .stderr(contains("failed to load config"));
}

#[tokio::test(flavor = "multi_thread")]
async fn expired_session_prints_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/user"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    std::fs::write(
        home.path().join("config.toml"),
        format!("base_url = \"{}\"\n", server.uri()),
    )
    .unwrap();
    mcpanel(home.path())
        .args(["whoami", "--route", "/instances"])
        .assert()
        .failure()
        .stderr(contains("redirect: /login?next=/instances"))
        .stderr(contains("Session expired, please log in again"));
}

#[tokio::test(flavor = "multi_thread")]
async fn info_formats_memory() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "result": {
                "os": "linux",
                "arch": "x86_64",
                "hostname": "mc-01",
                "cpus": 4,
                "mem_total": 16_777_216,
                "mem_used": 1536,
            },
        })))
        .mount(&server)
        .await;

    let home = tempfile::tempdir().unwrap();
    mcpanel(home.path())
        .args(["info", "--base-url", &server.uri()])
        .assert()
        .success()
        .stdout(contains("mc-01 (linux x86_64)"))
        .stdout(contains("1.500 MiB used / 16.000 GiB total"));
}
