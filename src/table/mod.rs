//! Arrow table handling: schema harmonization, concatenation and the window filter.

pub mod aggregate;
pub mod harmonize;

use std::sync::Arc;

use arrow::{
    array::{new_null_array, ArrayRef},
    compute::{cast_with_options, CastOptions},
    datatypes::{DataType, TimeUnit},
};

pub use aggregate::{concat_tables, filter_window};
pub use harmonize::harmonize;

/// The canonical type of the pickup and dropoff columns.
pub fn timestamp_type() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, None)
}

/// Casts `column` to `data_type`. Values that cannot be converted become null,
/// and so does the whole column when no cast exists between the two types.
pub fn cast_or_null(column: &ArrayRef, data_type: &DataType) -> ArrayRef {
    if column.data_type() == data_type {
        return Arc::clone(column);
    }

    match cast_with_options(column.as_ref(), data_type, &CastOptions::default()) {
        Ok(array) => array,
        Err(_) => new_null_array(data_type, column.len()),
    }
}

// -- Tests -------------------------------------------------------------------

#[cfg(test)]
mod test {
    use arrow::array::{Array, AsArray, BooleanArray, StringArray, TimestampNanosecondArray};
    use arrow::datatypes::TimestampMicrosecondType;

    use super::*;

    #[test]
    fn should_null_unparseable_strings() {
        let column: ArrayRef = Arc::new(StringArray::from(vec![
            Some("2023-01-15T08:30:00"),
            Some("not a date"),
            None,
        ]));

        let cast = cast_or_null(&column, &timestamp_type());
        let cast = cast.as_primitive::<TimestampMicrosecondType>();

        assert_eq!(cast.len(), 3);
        assert_eq!(cast.value(0), 1_673_771_400_000_000);
        assert!(cast.is_null(1));
        assert!(cast.is_null(2));
    }

    #[test]
    fn should_convert_nanoseconds() {
        let column: ArrayRef = Arc::new(TimestampNanosecondArray::from(vec![
            1_673_771_400_000_000_000,
        ]));

        let cast = cast_or_null(&column, &timestamp_type());

        assert_eq!(cast.data_type(), &timestamp_type());
        assert_eq!(
            cast.as_primitive::<TimestampMicrosecondType>().value(0),
            1_673_771_400_000_000
        );
    }

    #[test]
    fn should_null_column_without_cast() {
        let column: ArrayRef = Arc::new(BooleanArray::from(vec![true, false]));

        let cast = cast_or_null(&column, &DataType::Date32);

        assert_eq!(cast.data_type(), &DataType::Date32);
        assert_eq!(cast.null_count(), 2);
    }
}
