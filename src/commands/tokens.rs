use clap::Args;
use serde_json::json;
use tracing::debug;

use crate::commands::{GlobalArgs, OutputArgs, emit, prepare, pretty_json};
use crate::config::{Overrides, Settings};
use crate::error::Result;
use crate::payloads::RetryConfig;
use crate::payloads::tokens::{
    TokenCountOptions, TokenCountRequest, count_prompt_tokens, is_token_present, token_from_env,
};

#[derive(Debug, Args, Clone)]
pub struct TokensArgs {
    /// Text to count; read from stdin when omitted.
    pub text: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    /// Chat-completions endpoint that reports usage.
    #[arg(long)]
    pub endpoint: Option<String>,
    /// Request timeout in seconds.
    #[arg(long)]
    pub timeout: Option<u64>,
    /// Extra attempts on 429, 5xx, timeouts and connect errors.
    #[arg(long)]
    pub retries: Option<u32>,
    /// Base backoff delay in milliseconds.
    #[arg(long)]
    pub retry_delay: Option<u64>,
    /// Print the request instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
    #[command(flatten)]
    pub output: OutputArgs,
}

impl TokensArgs {
    fn overrides(&self) -> Overrides {
        Overrides {
            profile: None,
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            timeout: self.timeout,
            retries: self.retries,
            retry_delay: self.retry_delay,
        }
    }
}

pub async fn run(args: TokensArgs, global: &GlobalArgs) -> Result<()> {
    let settings = prepare(global, args.overrides())?;
    let text = super::read_text(args.text.clone(), "text")?;
    let output = count_or_describe(&settings, text, args.dry_run).await?;
    emit(&output, &args.output)
}

/// Returns the prompt token count, or the would-be request on a dry run.
pub(crate) async fn count_or_describe(
    settings: &Settings,
    text: String,
    dry_run: bool,
) -> Result<String> {
    let request = TokenCountRequest::new(settings.model.clone(), text);
    let retry = RetryConfig {
        timeout_secs: settings.timeout_secs,
        retries: settings.retries,
        retry_delay_ms: settings.retry_delay_ms,
    };
    let token_present = is_token_present(&settings.token_env);
    debug!(
        endpoint = %settings.token_endpoint,
        token_env = %settings.token_env,
        token_present,
        dry_run,
        "token count"
    );

    if dry_run {
        return pretty_json(&json!({
            "dry_run": true,
            "endpoint": settings.token_endpoint,
            "token_env": settings.token_env,
            "token_present": token_present,
            "timeout_secs": retry.timeout_secs,
            "retries": retry.retries,
            "retry_delay_ms": retry.retry_delay_ms,
            "request": request,
        }));
    }

    let options = TokenCountOptions {
        endpoint: settings.token_endpoint.clone(),
        api_key: token_from_env(&settings.token_env)?,
        retry,
    };
    let client = reqwest::Client::new();
    let prompt_tokens = count_prompt_tokens(&client, &request, &options).await?;
    Ok(prompt_tokens.to_string())
}
