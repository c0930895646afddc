use std::path::PathBuf;

use clap::Args;
use tracing::debug;

use crate::commands::{GlobalArgs, OutputArgs, emit, prepare, pretty_json};
use crate::config::Overrides;
use crate::error::Result;
use crate::payloads::vision::{DEFAULT_VISION_PROMPT, image_data_url_from_path, vision_request};

#[derive(Debug, Args, Clone)]
pub struct VisionArgs {
    /// Image to embed as a base64 data URL.
    pub image: PathBuf,
    /// Instruction sent alongside the image.
    #[arg(long, default_value = DEFAULT_VISION_PROMPT)]
    pub prompt: String,
    #[arg(long)]
    pub model: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: VisionArgs, global: &GlobalArgs) -> Result<()> {
    let settings = prepare(
        global,
        Overrides {
            model: args.model,
            ..Overrides::default()
        },
    )?;

    let data_url = image_data_url_from_path(&args.image)?;
    debug!(image = %args.image.display(), encoded_len = data_url.len(), "image encoded");

    let body = vision_request(&data_url, &args.prompt, &settings.model);
    emit(&pretty_json(&body)?, &args.output)
}
