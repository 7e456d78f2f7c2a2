//! Save the unified trips table to a parquet file.

use std::{fs::File, path::Path};

use anyhow::Result;
use arrow::record_batch::RecordBatch;
use parquet::{arrow::ArrowWriter, basic::Compression, file::properties::WriterProperties};

pub fn save_trips(table: &RecordBatch, file_path: &Path) -> Result<()> {
    let file = File::create(file_path)?;

    let props = WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build();

    let mut writer = ArrowWriter::try_new(file, table.schema(), Some(props))?;

    writer.write(table)?;
    writer.close()?;

    Ok(())
}

// -- Tests -------------------------------------------------------------------
