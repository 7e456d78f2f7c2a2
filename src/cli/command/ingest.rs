use std::path::PathBuf;

use anyhow::Result;
use indicatif::MultiProgress;

use crate::{
    cli::create_spinner, config::IngestConfig, download::HttpFetcher, ingest::ingest_trips,
    parquet,
};

use super::make_parquet_file_name;

pub async fn ingest(
    config: &IngestConfig,
    output: Option<PathBuf>,
    progress: &MultiProgress,
) -> Result<String> {
    // Log lines suspend every bar registered on `progress`
    let bar = progress.add(create_spinner("Fetching trip files...".to_string()));
    let fetcher = HttpFetcher::new().with_progress(bar.clone());

    let report = ingest_trips(config, &fetcher).await?;
    bar.finish_with_message(format!(
        "{} files loaded, {} skipped",
        report.loaded.len(),
        report.skipped.len()
    ));

    let parquet_file_name = output.unwrap_or_else(|| make_parquet_file_name(&config.window));
    parquet::save_trips(&report.table, &parquet_file_name)?;

    Ok(parquet_file_name.to_string_lossy().to_string())
}
