mod cli;
mod config;
mod download;
mod ingest;
mod parquet;
mod source;
mod table;
mod window;

use std::process;

use anyhow::{Error, Result};
use clap::Parser;
use cli::{command, Cli, Commands, ProgressWriter};
use indicatif::MultiProgress;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Error> {
    let progress = MultiProgress::new();
    init_logging(&progress);
    let cli = Cli::parse();

    match &cli.command {
        Commands::Ingest { run, output } => {
            // Configuration problems abort before anything is fetched
            let result = match run.config() {
                Ok(config) => command::ingest(&config, output.clone(), &progress).await,
                Err(e) => Err(e.into()),
            };
            match result {
                Ok(filename) => println!("File saved to `{}`", filename),
                Err(e) => exit_with(e),
            }
        }
        Commands::Plan { run } => match run.config() {
            Ok(config) => command::plan(&config)
                .iter()
                .for_each(|line| println!("{}", line)),
            Err(e) => exit_with(e.into()),
        },
    }

    Ok(())
}

fn init_logging(progress: &MultiProgress) {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let writer = ProgressWriter::new(progress.clone());
    fmt()
        .with_env_filter(env)
        .with_target(false)
        .with_writer(move || writer.clone())
        .init();
}

fn exit_with(e: Error) -> ! {
    eprintln!("Error: {}", e);
    process::exit(1)
}
