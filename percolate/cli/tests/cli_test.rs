use assert_cmd::Command;
use predicates::prelude::*;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn percolate() -> Command {
    let mut cmd = Command::cargo_bin("percolate").unwrap();
    cmd.env_remove("PERCOLATE_API_KEY")
        .env_remove("PERCOLATE_BASE_URL")
        .env_remove("PERCOLATE_TIMEOUT_MS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn missing_api_key_fails_with_config_error() {
    percolate()
        .args(["user", "42"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("API key is required"));
}

#[test]
fn rejects_unknown_order_by() {
    percolate()
        .args(["--api-key", "k", "user-posts", "1", "--order-by", "name"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown order_by field"));
}

#[tokio::test(flavor = "multi_thread")]
async fn prints_user_json() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v3/users/42"))
        .and(query_param("api_key", "ABC123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": 42, "name": "Jane"})),
        )
        .mount(&server)
        .await;

    percolate()
        .args(["--api-key", "ABC123", "--base-url"])
        .arg(format!("{}/api/v3/", server.uri()))
        .args(["--compact", "user", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"id":42,"name":"Jane"}"#));
}

#[tokio::test(flavor = "multi_thread")]
async fn http_error_exits_non_zero_without_leaking_key() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/groups/7/users"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    percolate()
        .args(["--api-key", "SECRETKEY", "--base-url"])
        .arg(server.uri())
        .args(["group-users", "7"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("status 503"))
        .stderr(predicate::str::contains("SECRETKEY").not());
}
