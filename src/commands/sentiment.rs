use clap::Args;

use crate::commands::{GlobalArgs, OutputArgs, emit, prepare};
use crate::config::Overrides;
use crate::error::Result;
use crate::payloads::sentiment::sentiment_test_code;

#[derive(Debug, Args, Clone)]
pub struct SentimentArgs {
    /// Text inserted into the user message; read from stdin when omitted.
    pub text: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: SentimentArgs, global: &GlobalArgs) -> Result<()> {
    prepare(global, Overrides::default())?;
    let text = super::read_text(args.text, "text")?;
    emit(&sentiment_test_code(&text), &args.output)
}
