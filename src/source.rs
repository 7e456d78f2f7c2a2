//! Taxi categories and the archive locations of their monthly trip files.

use std::fmt;

use chrono::{Datelike, NaiveDate};

pub const BASE_URL: &str = "https://d37ci6vzurychx.cloudfront.net/trip-data";

pub const PICKUP_COLUMN: &str = "pickup_datetime";
pub const DROPOFF_COLUMN: &str = "dropoff_datetime";
pub const TAXI_TYPE_COLUMN: &str = "taxi_type";

#[derive(Debug, Clone, PartialEq, Eq)]
/// A taxi service category. Only yellow and green have a known timestamp
/// naming convention; anything else is carried through as-is.
pub enum TaxiType {
    Yellow,
    Green,
    Other(String),
}

/// Source column names for pickup and dropoff timestamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renames {
    pub pickup: &'static str,
    pub dropoff: &'static str,
}

impl TaxiType {
    pub fn from_str(s: &str) -> Self {
        match s {
            "yellow" => TaxiType::Yellow,
            "green" => TaxiType::Green,
            _ => TaxiType::Other(s.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaxiType::Yellow => "yellow",
            TaxiType::Green => "green",
            TaxiType::Other(s) => s.as_str(),
        }
    }

    /// `None` means no rename is applied.
    pub fn renames(&self) -> Option<Renames> {
        match self {
            TaxiType::Yellow => Some(Renames {
                pickup: "tpep_pickup_datetime",
                dropoff: "tpep_dropoff_datetime",
            }),
            TaxiType::Green => Some(Renames {
                pickup: "lpep_pickup_datetime",
                dropoff: "lpep_dropoff_datetime",
            }),
            TaxiType::Other(_) => None,
        }
    }
}

impl fmt::Display for TaxiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One monthly file of one category.
pub struct Source {
    pub month: NaiveDate,
    pub taxi_type: TaxiType,
    pub url: String,
}

impl Source {
    pub fn new(base_url: &str, taxi_type: TaxiType, month: NaiveDate) -> Self {
        let url = source_url(base_url, taxi_type.as_str(), month);

        Source {
            month,
            taxi_type,
            url,
        }
    }
}

pub fn source_url(base_url: &str, taxi_type: &str, month: NaiveDate) -> String {
    format!(
        "{}/{}_tripdata_{:04}-{:02}.parquet",
        base_url,
        taxi_type,
        month.year(),
        month.month()
    )
}

/// Lists sources with months outer and categories inner.
pub fn generate_sources(base_url: &str, months: &[NaiveDate], taxi_types: &[String]) -> Vec<Source> {
    let mut sources = vec![];

    for month in months {
        for taxi_type in taxi_types {
            sources.push(Source::new(base_url, TaxiType::from_str(taxi_type), *month));
        }
    }

    sources
}

// -- Tests -------------------------------------------------------------------
