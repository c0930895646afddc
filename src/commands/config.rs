use clap::{Args, Subcommand};

use crate::commands::GlobalArgs;
use crate::config;
use crate::error::Result;

#[derive(Debug, Args, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Debug, Subcommand, Clone)]
enum ConfigSubcommand {
    /// Parse the config file and validate the --profile given, or every profile.
    Check,
}

pub fn run(args: ConfigArgs, global: &GlobalArgs) -> Result<()> {
    match args.command {
        ConfigSubcommand::Check => {
            let path = config::validate_config(global.profile.as_deref())?;
            println!("config OK: {}", path.display());
            Ok(())
        }
    }
}
