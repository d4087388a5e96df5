mod builder;
mod cli;
mod commands;
mod notify;
mod observability;
mod runner;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    observability::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy => {
            commands::deploy::deploy()?;
        }
        Commands::Invoke { function, data, raw } => {
            let output = commands::invoke::invoke(&function, data.as_deref(), raw)?;
            println!("{}", output);
        }
    }

    Ok(())
}
