use clap::Args;

use crate::commands::{GlobalArgs, OutputArgs, emit, prepare, pretty_json};
use crate::config::Overrides;
use crate::error::Result;
use crate::payloads::embeddings::embedding_request;

#[derive(Debug, Args, Clone)]
pub struct EmbedArgs {
    /// Messages to embed; one per line on stdin when omitted.
    pub messages: Vec<String>,
    /// Embedding model (defaults to the profile's or text-embedding-3-small).
    #[arg(long)]
    pub model: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: EmbedArgs, global: &GlobalArgs) -> Result<()> {
    let settings = prepare(global, Overrides::default())?;
    let model = args.model.unwrap_or(settings.embedding_model);

    let messages = if args.messages.is_empty() {
        super::read_text(None, "messages")?
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect()
    } else {
        args.messages
    };

    let body = embedding_request(&messages, &model);
    emit(&pretty_json(&body)?, &args.output)
}
