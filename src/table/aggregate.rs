//! Concatenation of harmonized tables and the window filter.

use std::{collections::HashSet, sync::Arc};

use arrow::{
    array::{new_null_array, ArrayRef, AsArray, TimestampMicrosecondArray},
    compute::{and, concat_batches, filter_record_batch, kernels::cmp},
    datatypes::{DataType, Field, Schema, SchemaRef, TimestampMicrosecondType},
    error::ArrowError,
    record_batch::RecordBatch,
};

use super::{cast_or_null, timestamp_type};
use crate::{
    source::{DROPOFF_COLUMN, PICKUP_COLUMN, TAXI_TYPE_COLUMN},
    window::Window,
};

/// A table with only the declared columns and no rows.
pub fn empty_table() -> RecordBatch {
    let schema = Arc::new(Schema::new(vec![
        Field::new(TAXI_TYPE_COLUMN, DataType::Utf8, true),
        Field::new(PICKUP_COLUMN, timestamp_type(), true),
        Field::new(DROPOFF_COLUMN, timestamp_type(), true),
    ]));

    RecordBatch::new_empty(schema)
}

/// Concatenates tables in order. Columns are unioned by name in first-seen
/// order; tables lacking a column get nulls, and values of a differing type
/// are cast to the first-seen type.
pub fn concat_tables(tables: &[RecordBatch]) -> Result<RecordBatch, ArrowError> {
    if tables.is_empty() {
        return Ok(empty_table());
    }

    let schema = union_schema(tables);
    let aligned = tables
        .iter()
        .map(|table| align(table, &schema))
        .collect::<Result<Vec<_>, ArrowError>>()?;

    concat_batches(&schema, &aligned)
}

fn union_schema(tables: &[RecordBatch]) -> SchemaRef {
    let mut fields: Vec<Field> = vec![];
    let mut seen: HashSet<String> = HashSet::new();

    for table in tables {
        for field in table.schema().fields() {
            if seen.insert(field.name().to_string()) {
                fields.push(field.as_ref().clone().with_nullable(true));
            }
        }
    }

    Arc::new(Schema::new(fields))
}

fn align(table: &RecordBatch, schema: &SchemaRef) -> Result<RecordBatch, ArrowError> {
    let columns: Vec<ArrayRef> = schema
        .fields()
        .iter()
        .map(|field| match table.column_by_name(field.name()) {
            Some(column) => cast_or_null(column, field.data_type()),
            None => new_null_array(field.data_type(), table.num_rows()),
        })
        .collect();

    RecordBatch::try_new(Arc::clone(schema), columns)
}

/// Keeps rows whose pickup time is in `[start, end)`. Rows with a null pickup,
/// or every row when there is no pickup column, are dropped.
pub fn filter_window(table: &RecordBatch, window: &Window) -> Result<RecordBatch, ArrowError> {
    let pickup = match table.column_by_name(PICKUP_COLUMN) {
        Some(pickup) => cast_or_null(pickup, &timestamp_type()),
        None => return Ok(table.slice(0, 0)),
    };
    let pickup = pickup.as_primitive::<TimestampMicrosecondType>();

    let start = TimestampMicrosecondArray::new_scalar(
        window.start_datetime().and_utc().timestamp_micros(),
    );
    let end =
        TimestampMicrosecondArray::new_scalar(window.end_datetime().and_utc().timestamp_micros());

    let mask = and(&cmp::gt_eq(pickup, &start)?, &cmp::lt(pickup, &end)?)?;

    filter_record_batch(table, &mask)
}

// -- Tests -------------------------------------------------------------------
