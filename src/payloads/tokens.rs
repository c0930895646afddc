//! Prompt token counting through a chat-completions compatible proxy.
//!
//! The proxy answers a normal completion; only `usage.prompt_tokens` is kept.

use std::env;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::payloads::messages::ChatMessage;
use crate::payloads::runtime::{RetryConfig, send_with_retry};

pub const DEFAULT_TOKEN_ENDPOINT: &str =
    "https://aiproxy.sanand.workers.dev/openai/v1/chat/completions";
pub const DEFAULT_TOKEN_ENV: &str = "AIPROXY_TOKEN";

#[derive(Debug, Clone, Serialize)]
pub struct TokenCountRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl TokenCountRequest {
    pub fn new(model: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![ChatMessage::user(text)],
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    usage: Option<UsagePayload>,
}

#[derive(Debug, Deserialize)]
struct UsagePayload {
    prompt_tokens: Option<u32>,
}

/// Where and how to send a token count request.
#[derive(Debug, Clone)]
pub struct TokenCountOptions {
    pub endpoint: String,
    pub api_key: String,
    pub retry: RetryConfig,
}

/// Reads the bearer token from `key_env`, rejecting blank values.
pub fn token_from_env(key_env: &str) -> Result<String> {
    env::var(key_env)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| Error::MissingToken {
            key_env: key_env.to_string(),
        })
}

pub fn is_token_present(key_env: &str) -> bool {
    token_from_env(key_env).is_ok()
}

pub async fn count_prompt_tokens(
    client: &reqwest::Client,
    request: &TokenCountRequest,
    options: &TokenCountOptions,
) -> Result<u32> {
    debug!(
        endpoint = %options.endpoint,
        model = %request.model,
        retries = options.retry.retries,
        "sending token count request"
    );

    let response = send_with_retry(
        client,
        &options.endpoint,
        &options.api_key,
        request,
        options.retry,
    )
    .await?;

    let body: CompletionResponse = response.json().await?;
    let prompt_tokens = body
        .usage
        .and_then(|usage| usage.prompt_tokens)
        .ok_or(Error::MissingUsage)?;

    info!(prompt_tokens, "token count received");
    Ok(prompt_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_wraps_text_in_single_user_message() {
        let request = TokenCountRequest::new("gpt-4o-mini", "List only the valid English words");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "model": "gpt-4o-mini",
                "messages": [{"role": "user", "content": "List only the valid English words"}]
            })
        );
    }

    #[test]
    fn missing_token_names_the_variable() {
        let err = token_from_env("LLMKIT_TEST_UNSET_TOKEN_VARIABLE").unwrap_err();
        assert_eq!(
            err.to_string(),
            "LLMKIT_TEST_UNSET_TOKEN_VARIABLE is not set in the environment"
        );
    }
}
