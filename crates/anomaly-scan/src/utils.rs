//! Shared helpers for reading Polars columns as plain `f64` values.

use crate::error::{Result, ResultExt, ScanError};
use polars::prelude::*;

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Whether a value is a missing-value marker.
///
/// Polars nulls are mapped to NaN by [`column_values`], so this is the only
/// check the scan needs.
#[inline]
pub fn is_missing(value: f64) -> bool {
    value.is_nan()
}

/// Check if a column of this dtype can be scanned.
///
/// Besides numeric dtypes this admits `Boolean` (read as 0.0 / 1.0) and the
/// all-null dtype.
#[inline]
pub fn is_scannable_dtype(dtype: &DataType) -> bool {
    is_numeric_dtype(dtype) || matches!(dtype, DataType::Boolean | DataType::Null)
}

/// Materialize a scannable column as `f64` values, nulls becoming NaN.
///
/// Booleans become 0.0 / 1.0. Columns with an all-null dtype are treated as
/// numeric columns that are entirely missing.
pub fn column_values(column: &Column) -> Result<Vec<f64>> {
    let dtype = column.dtype();
    if !is_scannable_dtype(dtype) {
        return Err(ScanError::NonNumericColumn {
            column: column.name().to_string(),
            dtype: dtype.to_string(),
        });
    }

    let float_series = column
        .as_materialized_series()
        .cast(&DataType::Float64)
        .context(format!("Casting {} to Float64", dtype))?;
    let values = float_series
        .f64()?
        .into_iter()
        .map(|v| v.unwrap_or(f64::NAN))
        .collect();

    Ok(values)
}
