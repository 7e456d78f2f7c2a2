//! Command line interface.

pub mod command;

use std::{
    io::{self, Write},
    path::PathBuf,
    time::Duration,
};

use clap::{Args, Parser, Subcommand};
use indicatif::{MultiProgress, ProgressBar};

use crate::{
    config::{ConfigError, IngestConfig},
    source::BASE_URL,
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Contains the commands
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch trip records for the window and save them to parquet
    Ingest {
        #[command(flatten)]
        run: RunArgs,
        /// Output file, defaults to a dated file in the home directory
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the files an ingest would fetch
    Plan {
        #[command(flatten)]
        run: RunArgs,
    },
}

/// Run window and variables, as the orchestrator passes them.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// First day of the window (inclusive), YYYY-MM-DD
    #[arg(long, env = "START_DATE")]
    pub start_date: Option<String>,
    /// Day after the window (exclusive), YYYY-MM-DD
    #[arg(long, env = "END_DATE")]
    pub end_date: Option<String>,
    /// JSON object of run variables, e.g. {"taxi_types": ["yellow", "green"]}
    #[arg(long, env = "RUN_VARS")]
    pub run_vars: Option<String>,
    /// Trip data archive root
    #[arg(long, env = "TRIPDATA_BASE_URL", default_value = BASE_URL)]
    pub base_url: String,
}

impl RunArgs {
    pub fn config(&self) -> Result<IngestConfig, ConfigError> {
        let config = IngestConfig::from_raw(
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.run_vars.as_deref(),
        )?;

        Ok(config.with_base_url(&self.base_url))
    }
}

/// Creates a spinner.
pub fn create_spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner().with_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));

    bar
}

/// Writes log lines to stderr with the progress bars cleared, so a redraw
/// never lands in the middle of a line.
#[derive(Clone)]
pub struct ProgressWriter {
    progress: MultiProgress,
}

impl ProgressWriter {
    pub fn new(progress: MultiProgress) -> Self {
        ProgressWriter { progress }
    }
}

impl Write for ProgressWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.progress
            .suspend(|| io::stderr().lock().write_all(buf))?;

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stderr().flush()
    }
}

// -- Tests -------------------------------------------------------------------
