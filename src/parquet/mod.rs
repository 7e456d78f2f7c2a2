//! Handles saving trip tables to disk in the _parquet_ file format.

pub mod trips;

pub use trips::save_trips;
