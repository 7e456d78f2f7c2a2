//! The trip ingestor: fetches every (month, category) file of the window and
//! returns one table of the trips picked up inside it.
//!
//! A file that cannot be fetched or decoded is logged and skipped. Only
//! failures assembling the final table are returned as errors.

use arrow::{error::ArrowError, record_batch::RecordBatch};
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    config::IngestConfig,
    download::{load_table, Fetch, FetchError},
    source::{generate_sources, Source},
    table::{concat_tables, filter_window, harmonize},
};

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to assemble trips table: {0}")]
    Arrow(#[from] ArrowError),
}

#[derive(Debug)]
pub struct SkippedSource {
    pub source: Source,
    pub error: FetchError,
}

#[derive(Debug)]
pub struct IngestReport {
    /// Trips with a pickup inside the window.
    pub table: RecordBatch,
    pub loaded: Vec<Source>,
    pub skipped: Vec<SkippedSource>,
}

pub async fn ingest_trips<F: Fetch>(
    config: &IngestConfig,
    fetcher: &F,
) -> Result<IngestReport, IngestError> {
    let months = config.window.month_starts();
    let sources = generate_sources(&config.base_url, &months, &config.taxi_types);

    info!(
        start = %config.window.start,
        end = %config.window.end,
        months = months.len(),
        files = sources.len(),
        "ingesting trips"
    );

    let mut tables = vec![];
    let mut loaded = vec![];
    let mut skipped = vec![];

    // One fetch at a time, in source order
    for source in sources {
        match load_source(fetcher, &source).await {
            Ok(table) => {
                info!(url = %source.url, rows = table.num_rows(), "loaded");
                tables.push(table);
                loaded.push(source);
            }
            Err(error) => {
                warn!(url = %source.url, %error, "skipping");
                skipped.push(SkippedSource { source, error });
            }
        }
    }

    let table = concat_tables(&tables)?;
    drop(tables);

    let trips = filter_window(&table, &config.window)?;
    info!(
        loaded = loaded.len(),
        skipped = skipped.len(),
        rows = trips.num_rows(),
        outside_window = table.num_rows() - trips.num_rows(),
        "ingestion finished"
    );

    Ok(IngestReport {
        table: trips,
        loaded,
        skipped,
    })
}

async fn load_source<F: Fetch>(fetcher: &F, source: &Source) -> Result<RecordBatch, FetchError> {
    let table = load_table(fetcher, &source.url).await?;

    Ok(harmonize(&table, &source.taxi_type)?)
}

// -- Tests -------------------------------------------------------------------
