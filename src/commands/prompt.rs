use crate::commands::{GlobalArgs, prepare};
use crate::config::Overrides;
use crate::error::Result;
use crate::payloads::prompt::YES_PROMPT;

pub fn run(global: &GlobalArgs) -> Result<()> {
    prepare(global, Overrides::default())?;
    println!("{YES_PROMPT}");
    Ok(())
}
