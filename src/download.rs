//! Downloads monthly trip files and decodes them into arrow tables.

use std::future::Future;

use arrow::{compute::concat_batches, error::ArrowError, record_batch::RecordBatch};
use bytes::{Bytes, BytesMut};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use parquet::{arrow::arrow_reader::ParquetRecordBatchReaderBuilder, errors::ParquetError};
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {0}")]
    Status(StatusCode),
    #[error("invalid parquet: {0}")]
    Parquet(#[from] ParquetError),
    #[error("invalid record batch: {0}")]
    Arrow(#[from] ArrowError),
}

/// Something that can return the raw bytes behind a URL.
pub trait Fetch {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<Bytes, FetchError>> + Send;
}

/// Fetches over HTTP, optionally reporting download progress.
pub struct HttpFetcher {
    client: Client,
    progress_bar: Option<ProgressBar>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher {
            client: Client::new(),
            progress_bar: None,
        }
    }

    pub fn with_progress(mut self, progress_bar: ProgressBar) -> Self {
        self.progress_bar = Some(progress_bar);
        self
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        let total_size = response.content_length().unwrap_or(0);
        if let Some(pb) = &self.progress_bar {
            start_download_progress(pb, url, total_size);
        }

        let mut body = BytesMut::with_capacity(total_size as usize);
        let mut stream = response.bytes_stream();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            body.extend_from_slice(&chunk);
            if let Some(pb) = &self.progress_bar {
                pb.set_position(body.len() as u64);
            }
        }

        debug!(url, bytes = body.len(), "downloaded");

        Ok(body.freeze())
    }
}

fn start_download_progress(pb: &ProgressBar, url: &str, total_size: u64) {
    let file_name = url.rsplit('/').next().unwrap_or(url).to_string();

    pb.reset();
    pb.set_message(file_name);
    pb.set_length(total_size);

    // Without a content length the bar goes back to a spinner
    if total_size > 0 {
        if let Ok(style) = ProgressStyle::with_template(
            "{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({percent}%) {eta}",
        ) {
            pb.set_style(style.progress_chars("=> "));
        }
    } else {
        pb.set_style(ProgressStyle::default_spinner());
    }
}

/// Decodes a parquet file held in memory into a single record batch.
pub fn read_parquet(data: Bytes) -> Result<RecordBatch, FetchError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(data)?;
    let schema = builder.schema().clone();
    let reader = builder.build()?;
    let batches = reader.collect::<Result<Vec<_>, ArrowError>>()?;

    Ok(concat_batches(&schema, &batches)?)
}

/// Fetches a URL and decodes it as parquet.
pub async fn load_table<F: Fetch>(fetcher: &F, url: &str) -> Result<RecordBatch, FetchError> {
    let data = fetcher.fetch(url).await?;

    read_parquet(data)
}

// -- Tests -------------------------------------------------------------------
