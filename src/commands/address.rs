use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::commands::{GlobalArgs, OutputArgs, emit, prepare, pretty_json};
use crate::config::Overrides;
use crate::error::{Error, Result};
use crate::payloads::address::{DEFAULT_ADDRESS_COUNT, FieldSpec, SchemaStyle, address_request};

#[derive(Debug, Args, Clone)]
pub struct AddressArgs {
    /// Required field as NAME:TYPE, e.g. `longitude:number`. Repeatable.
    #[arg(long = "field", value_name = "NAME:TYPE")]
    pub fields: Vec<String>,
    /// JSON file holding `[{"field": .., "type": ..}]`, applied before --field.
    #[arg(long, value_name = "PATH")]
    pub fields_file: Option<PathBuf>,
    /// Number of addresses asked for in the user message.
    #[arg(long, default_value_t = DEFAULT_ADDRESS_COUNT)]
    pub count: u32,
    /// Wrap the schema in the `json_schema` structured-output envelope.
    #[arg(long)]
    pub strict_schema: bool,
    #[arg(long)]
    pub model: Option<String>,
    #[command(flatten)]
    pub output: OutputArgs,
}

pub fn run(args: AddressArgs, global: &GlobalArgs) -> Result<()> {
    let settings = prepare(
        global,
        Overrides {
            model: args.model.clone(),
            ..Overrides::default()
        },
    )?;

    let mut fields = Vec::new();
    if let Some(path) = &args.fields_file {
        let raw = fs::read_to_string(path).map_err(|err| {
            Error::InvalidInput(format!(
                "Failed to read fields file '{}': {err}",
                path.display()
            ))
        })?;
        fields.extend(FieldSpec::parse_list(&raw)?);
    }
    for spec in &args.fields {
        fields.push(FieldSpec::parse(spec)?);
    }
    if fields.is_empty() {
        return Err(Error::InvalidInput(
            "No fields provided. Use --field NAME:TYPE or --fields-file PATH.".to_string(),
        ));
    }

    let style = if args.strict_schema {
        SchemaStyle::Strict
    } else {
        SchemaStyle::Bare
    };
    let body = address_request(&fields, args.count, &settings.model, style);
    emit(&pretty_json(&body)?, &args.output)
}
