use clap::Args;

use crate::commands::{GlobalArgs, prepare};
use crate::config::Overrides;
use crate::error::Result;
use crate::payloads::services::Service;

#[derive(Debug, Args, Clone)]
pub struct EndpointsArgs {
    /// Print only this service's URL.
    #[arg(value_enum)]
    pub service: Option<Service>,
}

pub fn run(args: EndpointsArgs, global: &GlobalArgs) -> Result<()> {
    prepare(global, Overrides::default())?;
    match args.service {
        Some(service) => println!("{}", service.endpoint()),
        None => {
            for service in Service::ALL {
                println!("{}", service.endpoint());
            }
        }
    }
    Ok(())
}
