mod common;

use common::FakeDirectory;
use melcloud_bridge::config::{EntryData, UserInput};
use melcloud_bridge::config_flow::{
    ConfigFlow, FlowResult, ABORT_ALREADY_CONFIGURED, ABORT_ALREADY_IMPORTED,
    ERROR_CANNOT_CONNECT, ERROR_INVALID_AUTH,
};
use melcloud_bridge::{Authenticator, Error, Language};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = "test-email@test-domain.com";

fn input() -> UserInput {
    UserInput {
        username: USER.to_string(),
        password: "test-password".to_string(),
        language: Language::English,
    }
}

async fn login_server(response: ResponseTemplate) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .respond_with(response)
        .mount(&server)
        .await;
    server
}

fn ok_login() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ErrorId": null,
        "LoginData": {"ContextKey": "test-token"}
    }))
}

fn form_error(result: &FlowResult) -> Option<&'static str> {
    match result {
        FlowResult::Form { errors, .. } => errors.get("base").copied(),
        other => panic!("expected form, got {other:?}"),
    }
}

#[tokio::test]
async fn first_step_shows_empty_form() {
    let server = login_server(ok_login()).await;
    let auth = Authenticator::builder().base_url(server.uri()).build();
    let directory = FakeDirectory::empty();
    let flow = ConfigFlow::new(&auth, &directory, Vec::new());

    let result = flow.step_user(None).await;
    assert_eq!(form_error(&result), None);
}

#[tokio::test]
async fn valid_input_creates_token_entry() {
    let server = login_server(ok_login()).await;
    let auth = Authenticator::builder().base_url(server.uri()).build();
    let directory = FakeDirectory::empty();
    let flow = ConfigFlow::new(&auth, &directory, Vec::new());

    let result = flow.step_user(Some(input())).await;
    assert_eq!(
        result,
        FlowResult::CreateEntry {
            title: USER.to_string(),
            unique_id: USER.to_string(),
            data: EntryData::with_token("test-token"),
        }
    );
    assert_eq!(*directory.seen_tokens.lock().unwrap(), vec!["test-token".to_string()]);
}

#[tokio::test]
async fn rejected_login_shows_invalid_auth() {
    let server = login_server(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "ErrorId": 1,
        "LoginData": null
    })))
    .await;
    let auth = Authenticator::builder().base_url(server.uri()).build();
    let directory = FakeDirectory::empty();
    let flow = ConfigFlow::new(&auth, &directory, Vec::new());

    let result = flow.step_user(Some(input())).await;
    assert_eq!(form_error(&result), Some(ERROR_INVALID_AUTH));
    assert!(directory.seen_tokens.lock().unwrap().is_empty());
}

#[tokio::test]
async fn forbidden_and_unauthorized_show_invalid_auth() {
    for status in [401, 403] {
        let server = login_server(ResponseTemplate::new(status)).await;
        let auth = Authenticator::builder().base_url(server.uri()).build();
        let directory = FakeDirectory::empty();
        let flow = ConfigFlow::new(&auth, &directory, Vec::new());
        let result = flow.step_user(Some(input())).await;
        assert_eq!(form_error(&result), Some(ERROR_INVALID_AUTH), "status {status}");
    }
}

#[tokio::test]
async fn server_error_shows_cannot_connect() {
    let server = login_server(ResponseTemplate::new(500)).await;
    let auth = Authenticator::builder().base_url(server.uri()).build();
    let directory = FakeDirectory::empty();
    let flow = ConfigFlow::new(&auth, &directory, Vec::new());

    let result = flow.step_user(Some(input())).await;
    assert_eq!(form_error(&result), Some(ERROR_CANNOT_CONNECT));
}

#[tokio::test]
async fn device_probe_failure_shows_cannot_connect() {
    let server = login_server(ok_login()).await;
    let auth = Authenticator::builder().base_url(server.uri()).build();
    let directory = FakeDirectory::failing(Error::Timeout);
    let flow = ConfigFlow::new(&auth, &directory, Vec::new());

    let result = flow.step_user(Some(input())).await;
    assert_eq!(form_error(&result), Some(ERROR_CANNOT_CONNECT));
}

#[tokio::test]
async fn existing_account_refreshes_token_and_aborts() {
    let server = login_server(ok_login()).await;
    let auth = Authenticator::builder().base_url(server.uri()).build();
    let directory = FakeDirectory::empty();
    let flow = ConfigFlow::new(&auth, &directory, vec![USER.to_string()]);

    let result = flow.step_user(Some(input())).await;
    assert_eq!(
        result,
        FlowResult::Abort {
            reason: ABORT_ALREADY_CONFIGURED,
            updated_data: Some(EntryData::with_token("test-token")),
        }
    );
}

#[tokio::test]
async fn import_of_known_account_aborts_without_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/Login/ClientLogin"))
        .respond_with(ok_login())
        .expect(0)
        .mount(&server)
        .await;
    let auth = Authenticator::builder().base_url(server.uri()).build();
    let directory = FakeDirectory::empty();
    let flow = ConfigFlow::new(&auth, &directory, vec![USER.to_string()]);

    let result = flow.step_import(input()).await;
    assert_eq!(
        result,
        FlowResult::Abort {
            reason: ABORT_ALREADY_IMPORTED,
            updated_data: None,
        }
    );
}

#[tokio::test]
async fn import_of_new_account_creates_entry() {
    let server = login_server(ok_login()).await;
    let auth = Authenticator::builder().base_url(server.uri()).build();
    let directory = FakeDirectory::empty();
    let flow = ConfigFlow::new(&auth, &directory, vec!["someone-else".to_string()]);

    let result = flow.step_import(input()).await;
    assert!(matches!(result, FlowResult::CreateEntry { ref title, .. } if title == USER));
}
