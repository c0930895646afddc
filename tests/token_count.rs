use assert_cmd::Command;
use llmkit::Error;
use llmkit::payloads::RetryConfig;
use llmkit::payloads::tokens::{TokenCountOptions, TokenCountRequest, count_prompt_tokens};
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/openai/v1/chat/completions";

fn usage_body(prompt_tokens: u32) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": "E"}, "finish_reason": "stop"}],
        "usage": {"prompt_tokens": prompt_tokens, "completion_tokens": 1, "total_tokens": prompt_tokens + 1}
    })
}

fn options(server: &MockServer, retries: u32) -> TokenCountOptions {
    TokenCountOptions {
        endpoint: format!("{}{COMPLETIONS_PATH}", server.uri()),
        api_key: "test-token".to_string(),
        retry: RetryConfig {
            timeout_secs: Some(5),
            retries,
            retry_delay_ms: 1,
        },
    }
}

#[tokio::test]
async fn returns_prompt_tokens_from_usage() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({
            "model": "gpt-4o-mini",
            "messages": [{"role": "user", "content": "How many tokens?"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(usage_body(12)))
        .expect(1)
        .mount(&server)
        .await;

    let request = TokenCountRequest::new("gpt-4o-mini", "How many tokens?");
    let count = count_prompt_tokens(&reqwest::Client::new(), &request, &options(&server, 0))
        .await
        .expect("token count should succeed");

    assert_eq!(count, 12);
}

#[tokio::test]
async fn retries_server_errors_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(usage_body(40)))
        .expect(1)
        .mount(&server)
        .await;

    let request = TokenCountRequest::new("gpt-4o-mini", "retry me");
    let count = count_prompt_tokens(&reqwest::Client::new(), &request, &options(&server, 2))
        .await
        .expect("third attempt should succeed");

    assert_eq!(count, 40);
}

#[tokio::test]
async fn client_errors_are_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad token"))
        .expect(1)
        .mount(&server)
        .await;

    let request = TokenCountRequest::new("gpt-4o-mini", "hello");
    let err = count_prompt_tokens(&reqwest::Client::new(), &request, &options(&server, 3))
        .await
        .expect_err("401 should fail");

    match err {
        Error::Api { status, body } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(body, "bad token");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn response_without_usage_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let request = TokenCountRequest::new("gpt-4o-mini", "hello");
    let err = count_prompt_tokens(&reqwest::Client::new(), &request, &options(&server, 0))
        .await
        .expect_err("missing usage should fail");

    assert!(matches!(err, Error::MissingUsage));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn llmtok_prints_count_from_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header("authorization", "Bearer cli-secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(usage_body(7)))
        .mount(&server)
        .await;

    let endpoint = format!("{}{COMPLETIONS_PATH}", server.uri());
    let assert = tokio::task::spawn_blocking(move || {
        Command::new(assert_cmd::cargo::cargo_bin!("llmtok"))
            .env_remove("LLMKIT_TOKEN_URL")
            .env_remove("LLMKIT_LOG")
            .env("AIPROXY_TOKEN", "cli-secret")
            .args(["--endpoint", endpoint.as_str(), "--verbose", "hello"])
            .assert()
    })
    .await
    .expect("command task should join");

    assert
        .success()
        .stdout("7\n")
        .stderr(contains("token_present=true").and(contains("cli-secret").not()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn llmtok_reports_api_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_string("model not found"))
        .mount(&server)
        .await;

    let endpoint = format!("{}{COMPLETIONS_PATH}", server.uri());
    let assert = tokio::task::spawn_blocking(move || {
        Command::new(assert_cmd::cargo::cargo_bin!("llmtok"))
            .env("AIPROXY_TOKEN", "cli-secret")
            .args(["--endpoint", endpoint.as_str(), "hello"])
            .assert()
    })
    .await
    .expect("command task should join");

    assert
        .failure()
        .stderr(contains("token count API error 400 Bad Request: model not found"));
}
