//! Lenient per-row coercion of DataFrame columns. Values that cannot be read
//! as the requested type become `None` instead of failing the whole column.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::error::{AppError, AppResult};
use crate::services::excel::utils::parse_timestamp;

/// Fails with `MissingColumns` listing every name in `required` that `df` lacks.
pub fn require_columns(df: &DataFrame, required: &[&str]) -> AppResult<()> {
    let present = df.get_column_names();
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !present.contains(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        tracing::error!("Missing required columns: {:?}", missing);
        Err(AppError::MissingColumns(missing))
    }
}

pub fn timestamps(series: &Series) -> AppResult<Vec<Option<NaiveDateTime>>> {
    let values: Vec<Option<NaiveDateTime>> = match series.dtype() {
        DataType::Datetime(unit, _) => {
            let unit = *unit;
            let physical = series.cast(&DataType::Int64)?;
            physical
                .i64()?
                .into_iter()
                .map(|raw| raw.and_then(|raw| from_epoch(raw, unit)))
                .collect()
        }
        DataType::Date => {
            let days = series.cast(&DataType::Int32)?;
            days.i32()?
                .into_iter()
                .map(|raw| raw.and_then(from_epoch_days))
                .collect()
        }
        DataType::String => series
            .str()?
            .into_iter()
            .map(|value| value.and_then(parse_timestamp))
            .collect(),
        other => {
            tracing::warn!("Column {} has type {}, treating all values as missing", series.name(), other);
            vec![None; series.len()]
        }
    };
    log_excluded(series, &values);
    Ok(values)
}

pub fn numbers(series: &Series) -> AppResult<Vec<Option<f64>>> {
    let values: Vec<Option<f64>> = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|value| value.and_then(parse_number))
            .collect(),
        dtype if dtype.is_numeric() => series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|value| value.filter(|v| v.is_finite()))
            .collect(),
        other => {
            tracing::warn!("Column {} has type {}, treating all values as missing", series.name(), other);
            vec![None; series.len()]
        }
    };
    log_excluded(series, &values);
    Ok(values)
}

/// Plain decimal text only (`1234.5`). Grouped or comma-decimal text such as
/// `1,234` is not a number.
pub fn parse_number(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn from_epoch(raw: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let (per_second, nanos_per_tick) = match unit {
        TimeUnit::Nanoseconds => (1_000_000_000, 1),
        TimeUnit::Microseconds => (1_000_000, 1_000),
        TimeUnit::Milliseconds => (1_000, 1_000_000),
    };
    let seconds = raw.div_euclid(per_second);
    let nanos = (raw.rem_euclid(per_second) * nanos_per_tick) as u32;
    DateTime::from_timestamp(seconds, nanos).map(|dt| dt.naive_utc())
}

fn from_epoch_days(days: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(1970, 1, 1)?
        .checked_add_signed(chrono::Duration::days(days as i64))?
        .and_hms_opt(0, 0, 0)
}

fn log_excluded<T>(series: &Series, values: &[Option<T>]) {
    let excluded = values.iter().filter(|v| v.is_none()).count();
    if excluded > 0 {
        tracing::debug!("Column {}: {} of {} values missing or unparseable", series.name(), excluded, values.len());
    }
}
