//! Normalizes one category's trip table to the canonical column names and types.

use std::sync::Arc;

use arrow::{
    array::{ArrayRef, StringArray},
    datatypes::{DataType, Field, Schema},
    error::ArrowError,
    record_batch::RecordBatch,
};

use super::{cast_or_null, timestamp_type};
use crate::source::{TaxiType, DROPOFF_COLUMN, PICKUP_COLUMN, TAXI_TYPE_COLUMN};

/// Renames the category's timestamp columns, coerces them to timestamps and
/// appends a `taxi_type` column.
pub fn harmonize(table: &RecordBatch, taxi_type: &TaxiType) -> Result<RecordBatch, ArrowError> {
    let schema = table.schema();
    let renames = taxi_type
        .renames()
        .map(|r| [(r.pickup, PICKUP_COLUMN), (r.dropoff, DROPOFF_COLUMN)]);

    let renamed = |name: &str| -> Option<&'static str> {
        renames
            .iter()
            .flatten()
            .find(|(from, _)| *from == name)
            .map(|(_, to)| *to)
    };
    // Canonical names some source column will be renamed to
    let targets: Vec<&str> = schema
        .fields()
        .iter()
        .filter_map(|f| renamed(f.name()))
        .collect();

    let mut fields = Vec::with_capacity(schema.fields().len() + 1);
    let mut columns: Vec<ArrayRef> = Vec::with_capacity(schema.fields().len() + 1);

    for (field, column) in schema.fields().iter().zip(table.columns()) {
        let name = match renamed(field.name()) {
            Some(to) => to,
            None if field.name() == TAXI_TYPE_COLUMN => continue,
            None if targets.contains(&field.name().as_str()) => continue,
            None => field.name().as_str(),
        };

        if name == PICKUP_COLUMN || name == DROPOFF_COLUMN {
            fields.push(Field::new(name, timestamp_type(), true));
            columns.push(cast_or_null(column, &timestamp_type()));
        } else {
            fields.push(field.as_ref().clone());
            columns.push(Arc::clone(column));
        }
    }

    fields.push(Field::new(TAXI_TYPE_COLUMN, DataType::Utf8, false));
    columns.push(Arc::new(StringArray::from(vec![
        taxi_type.as_str();
        table.num_rows()
    ])));

    RecordBatch::try_new(Arc::new(Schema::new(fields)), columns)
}

// -- Tests -------------------------------------------------------------------
