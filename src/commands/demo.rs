use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::Args;
use owo_colors::OwoColorize;
use tracing::error;

use crate::commands::{GlobalArgs, prepare, pretty_json, tokens};
use crate::config::{Overrides, Settings};
use crate::error::{Error, Result};
use crate::payloads::address::{
    DEFAULT_ADDRESS_COUNT, FieldSpec, FieldType, SchemaStyle, address_request,
};
use crate::payloads::embeddings::embedding_request;
use crate::payloads::prompt::YES_PROMPT;
use crate::payloads::sentiment::sentiment_test_code;
use crate::payloads::services::Service;
use crate::payloads::similarity::MOST_SIMILAR_SNIPPET;
use crate::payloads::vision::{DEFAULT_VISION_PROMPT, image_data_url_from_path, vision_request};

const SAMPLE_SENTIMENT_TEXT: &str = "Sx RF 8  sBx5X3K  ywpr55N4n s O ssI  6cjrU Qkn0sZx";
const SAMPLE_TOKEN_TEXT: &str = "List only the valid English words from these: E, 46ZuR2ZxK, 8Ojovt, WSt4wQB, yYyTMKkpnp, tc1Mn2g2, wNKg7, XBxgkeIswj, osJIA, 8dUJ, reAe0zBk";
const SAMPLE_EMBEDDING_MESSAGES: [&str; 2] = [
    "Dear user, please verify your transaction code 10389 sent to user@example.com",
    "Dear user, please verify your transaction code 33454 sent to user@example.com",
];

#[derive(Debug, Args, Clone)]
pub struct DemoArgs {
    /// Image used for the text extraction request.
    #[arg(long, value_name = "PATH")]
    pub image: Option<PathBuf>,
    /// Print the token count request instead of sending it.
    #[arg(long)]
    pub dry_run: bool,
}

pub async fn run(args: DemoArgs, global: &GlobalArgs) -> Result<()> {
    let settings = prepare(global, Overrides::default())?;
    let color = io::stdout().is_terminal();
    let mut failed = Vec::new();

    for question in 1..=9u8 {
        print_header(question, color);
        match section(question, &args, &settings).await {
            Ok(text) => println!("{text}"),
            Err(err) => {
                error!(question, error = %err, "demo section failed");
                failed.push(question);
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(Error::InvalidInput(format!(
            "demo finished with failed sections: {}",
            failed
                .iter()
                .map(|q| format!("Q{q}"))
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }
}

async fn section(question: u8, args: &DemoArgs, settings: &Settings) -> Result<String> {
    match question {
        1 => Ok(sentiment_test_code(SAMPLE_SENTIMENT_TEXT)),
        2 => tokens::count_or_describe(settings, SAMPLE_TOKEN_TEXT.to_string(), args.dry_run).await,
        3 => {
            let fields = [
                FieldSpec::new("state", FieldType::String),
                FieldSpec::new("county", FieldType::String),
                FieldSpec::new("longitude", FieldType::Number),
            ];
            pretty_json(&address_request(
                &fields,
                DEFAULT_ADDRESS_COUNT,
                &settings.model,
                SchemaStyle::Bare,
            ))
        }
        4 => match &args.image {
            Some(path) => {
                let data_url = image_data_url_from_path(path)?;
                pretty_json(&vision_request(&data_url, DEFAULT_VISION_PROMPT, &settings.model))
            }
            None => Ok(
                "skipped: pass --image PATH to build the text extraction request".to_string(),
            ),
        },
        5 => pretty_json(&embedding_request(
            &SAMPLE_EMBEDDING_MESSAGES,
            &settings.embedding_model,
        )),
        6 => Ok(MOST_SIMILAR_SNIPPET.to_string()),
        7 => Ok(Service::Docs.endpoint().to_string()),
        8 => Ok(Service::Employee.endpoint().to_string()),
        _ => Ok(YES_PROMPT.to_string()),
    }
}

fn print_header(question: u8, color: bool) {
    let header = format!("=================Q{question}====================");
    if color {
        println!("{}", header.bold().cyan());
    } else {
        println!("{header}");
    }
}
