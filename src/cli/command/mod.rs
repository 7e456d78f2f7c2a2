pub mod ingest;
pub mod plan;

use std::path::PathBuf;

pub use ingest::ingest;
pub use plan::plan;

use crate::window::Window;

pub fn make_parquet_file_name(window: &Window) -> PathBuf {
    let file_name = format!(
        "tripdata-{}-{}.parquet",
        window.start.format("%Y-%m-%d"),
        window.end.format("%Y-%m-%d")
    );

    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(file_name)
}

// -- Tests -------------------------------------------------------------------
