use std::time::{Duration, Instant};

use melcloud_bridge::{Authenticator, Credentials, Error, Language};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn authenticator(server: &MockServer) -> Authenticator {
    Authenticator::builder().base_url(server.uri()).build()
}

fn credentials() -> Credentials {
    Credentials::new("user@example.com", "secret", Language::German)
}

#[tokio::test]
async fn login_posts_expected_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .and(body_partial_json(serde_json::json!({
            "Email": "user@example.com",
            "Password": "secret",
            "Language": 4,
            "AppVersion": "1.19.1.1",
            "Persist": true,
            "CaptchaResponse": null
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ErrorId": null,
            "LoginData": {"ContextKey": "CTX-1"}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = authenticator(&server)
        .login(&credentials())
        .await
        .expect("login should succeed");
    assert_eq!(token, "CTX-1");
}

#[tokio::test]
async fn rejected_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ErrorId": 1,
            "ErrorMessage": null,
            "LoginData": null
        })))
        .mount(&server)
        .await;

    let err = authenticator(&server).login(&credentials()).await.unwrap_err();
    assert!(matches!(err, Error::InvalidCredentials));
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn missing_context_key_is_a_connectivity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ErrorId": null,
            "LoginData": {}
        })))
        .mount(&server)
        .await;

    let err = authenticator(&server).login(&credentials()).await.unwrap_err();
    assert!(matches!(err, Error::Protocol(_)));
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn malformed_body_is_a_connectivity_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let err = authenticator(&server).login(&credentials()).await.unwrap_err();
    assert!(err.is_connectivity());
}

#[tokio::test]
async fn http_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = authenticator(&server).login(&credentials()).await.unwrap_err();
    assert!(matches!(err, Error::Http(_)));
    assert_eq!(err.http_status(), Some(401));
}

#[tokio::test]
async fn slow_server_times_out_within_bound() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({
                    "ErrorId": null,
                    "LoginData": {"ContextKey": "late"}
                }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let auth = Authenticator::builder()
        .base_url(server.uri())
        .timeout(Duration::from_millis(200))
        .build();

    let started = Instant::now();
    let err = auth.login(&credentials()).await.unwrap_err();
    assert!(matches!(err, Error::Timeout), "got {err:?}");
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn login_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = authenticator(&server).login(&credentials()).await.unwrap_err();
    assert_eq!(err.http_status(), Some(503));
}

#[tokio::test]
async fn unreachable_host_is_a_connectivity_failure() {
    let auth = Authenticator::builder()
        .base_url("http://127.0.0.1:9")
        .timeout(Duration::from_secs(2))
        .build();
    let err = auth.login(&credentials()).await.unwrap_err();
    assert!(err.is_connectivity());
}
