use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use serde_json::{Map, Value};

use crate::commands::{GlobalArgs, OutputArgs, emit, prepare, pretty_json};
use crate::config::Overrides;
use crate::error::{Error, Result};
use crate::payloads::similarity::{MOST_SIMILAR_SNIPPET, most_similar};

#[derive(Debug, Args, Clone)]
pub struct SimilarityArgs {
    /// JSON object mapping phrases to embedding vectors. Without it the
    /// reference snippet is printed instead.
    #[arg(long, value_name = "PATH")]
    pub embeddings: Option<PathBuf>,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: SimilarityArgs, global: &GlobalArgs) -> Result<()> {
    prepare(global, Overrides::default())?;

    let Some(path) = &args.embeddings else {
        return emit(MOST_SIMILAR_SNIPPET, &args.output);
    };

    let embeddings = load_embeddings(path)?;
    let pair = most_similar(&embeddings)?.ok_or_else(|| {
        Error::InvalidInput(
            "No phrase pair scored above -1. Need at least two phrases with non-zero, finite \
             embedding vectors."
                .to_string(),
        )
    })?;
    emit(&pretty_json(&pair)?, &args.output)
}

fn load_embeddings(path: &Path) -> Result<Vec<(String, Vec<f64>)>> {
    let raw = fs::read_to_string(path).map_err(|err| {
        Error::InvalidInput(format!(
            "Failed to read embeddings file '{}': {err}",
            path.display()
        ))
    })?;
    let object: Map<String, Value> = serde_json::from_str(&raw)?;

    object
        .into_iter()
        .map(|(phrase, vector)| {
            let vector: Vec<f64> = serde_json::from_value(vector).map_err(|err| {
                Error::InvalidInput(format!(
                    "Embedding for '{phrase}' is not a number array: {err}"
                ))
            })?;
            Ok((phrase, vector))
        })
        .collect()
}
