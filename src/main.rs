use std::io;
use std::process;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, shells};
use llmkit::commands::address::{self, AddressArgs};
use llmkit::commands::config::{self, ConfigArgs};
use llmkit::commands::demo::{self, DemoArgs};
use llmkit::commands::embed::{self, EmbedArgs};
use llmkit::commands::endpoints::{self, EndpointsArgs};
use llmkit::commands::sentiment::{self, SentimentArgs};
use llmkit::commands::similarity::{self, SimilarityArgs};
use llmkit::commands::tokens::{self, TokensArgs};
use llmkit::commands::vision::{self, VisionArgs};
use llmkit::commands::{GlobalArgs, VERSION_TEXT, prompt};

const ROOT_HELP_EXAMPLES: &str = "Examples:\n  llmkit address --field state:string --field longitude:number\n  llmkit vision invoice.png --save request.json\n  echo \"hello world\" | llmkit tokens --dry-run\n  llmkit similarity --embeddings phrases.json\n  llmkit demo --dry-run\n  llmkit completion bash > ~/.local/share/bash-completion/completions/llmkit";

const TOKENS_HELP_EXAMPLES: &str = "Examples:\n  llmkit tokens \"List only the valid English words from these: E, 46ZuR2ZxK\"\n  llmkit tokens --retries 2 --timeout 10 < prompt.txt\n  llmkit tokens --dry-run --endpoint http://localhost:8080/v1/chat/completions \"hi\"";

#[derive(Debug, Parser)]
#[command(
    name = "llmkit",
    about = "Request builders for OpenAI-compatible APIs",
    version = VERSION_TEXT,
    after_help = ROOT_HELP_EXAMPLES
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Generate a sentiment classifier test program")]
    Sentiment(SentimentArgs),
    #[command(
        about = "Count prompt tokens through the usage-reporting proxy",
        after_help = TOKENS_HELP_EXAMPLES
    )]
    Tokens(TokensArgs),
    #[command(about = "Build a structured-output request for US addresses")]
    Address(AddressArgs),
    #[command(about = "Build a text extraction request for an image")]
    Vision(VisionArgs),
    #[command(about = "Build an embeddings request")]
    Embed(EmbedArgs),
    #[command(about = "Print the most-similar-pair snippet or compute it from embeddings")]
    Similarity(SimilarityArgs),
    #[command(about = "Print companion service endpoints")]
    Endpoints(EndpointsArgs),
    #[command(about = "Print the prompt that makes a model say Yes")]
    Prompt,
    #[command(about = "Print every canned answer in sequence")]
    Demo(DemoArgs),
    #[command(about = "Manage local config")]
    Config(ConfigArgs),
    #[command(about = "Generate shell completion script")]
    Completion {
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

fn print_completion(shell: CompletionShell) {
    let mut cmd = Cli::command();
    match shell {
        CompletionShell::Bash => generate(shells::Bash, &mut cmd, "llmkit", &mut io::stdout()),
        CompletionShell::Zsh => generate(shells::Zsh, &mut cmd, "llmkit", &mut io::stdout()),
        CompletionShell::Fish => generate(shells::Fish, &mut cmd, "llmkit", &mut io::stdout()),
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let global = &cli.global;

    let result = match cli.command {
        Commands::Sentiment(args) => sentiment::run(args, global),
        Commands::Tokens(args) => tokens::run(args, global).await,
        Commands::Address(args) => address::run(args, global),
        Commands::Vision(args) => vision::run(args, global),
        Commands::Embed(args) => embed::run(args, global),
        Commands::Similarity(args) => similarity::run(args, global),
        Commands::Endpoints(args) => endpoints::run(args, global),
        Commands::Prompt => prompt::run(global),
        Commands::Demo(args) => demo::run(args, global).await,
        Commands::Config(args) => config::run(args, global),
        Commands::Completion { shell } => {
            print_completion(shell);
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("{err}");
        process::exit(1);
    }
}
