use std::process;

use clap::Parser;
use llmkit::commands::tokens::{self, TokensArgs};
use llmkit::commands::{GlobalArgs, VERSION_TEXT};

#[derive(Debug, Parser)]
#[command(
    name = "llmtok",
    about = "Count the prompt tokens of a message",
    version = VERSION_TEXT
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(flatten)]
    tokens: TokensArgs,
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    if let Err(err) = tokens::run(cli.tokens, &cli.global).await {
        eprintln!("{err}");
        process::exit(1);
    }
}
