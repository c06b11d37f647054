use std::collections::HashSet;
use std::path::Path;

use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use polars::prelude::*;

use super::translate::translate_dataset;
use super::utils::{cell_datetime, cell_text, clean_column_name};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Date,
    Text,
}

/// Reads the first worksheet of `path` into a DataFrame, first row as header.
pub fn read_workbook(path: &Path) -> AppResult<DataFrame> {
    if !path.exists() {
        tracing::error!("Spreadsheet not found: {}", path.display());
        return Err(AppError::FileNotFound(path.to_path_buf()));
    }

    let start = std::time::Instant::now();
    tracing::info!("Opening workbook {}", path.display());
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        tracing::error!("Failed to open Excel file: {}", e);
        AppError::from(e)
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| AppError::Spreadsheet("Nenhuma aba encontrada na planilha".to_string()))?;
    tracing::debug!("Reading sheet {}", sheet_name);

    let range = workbook.worksheet_range(&sheet_name)?;
    let df = sheet_to_dataframe(&range)?;
    tracing::info!(
        "Loaded {} rows x {} columns from {} in {:?}",
        df.height(),
        df.width(),
        sheet_name,
        start.elapsed()
    );
    Ok(df)
}

/// Reads the spreadsheet and translates it to the Portuguese vocabulary.
pub fn load_dataset(path: &Path) -> AppResult<DataFrame> {
    let mut df = read_workbook(path)?;
    translate_dataset(&mut df)?;
    Ok(df)
}

pub fn sheet_to_dataframe(range: &Range<Data>) -> AppResult<DataFrame> {
    let rows: Vec<&[Data]> = range.rows().collect();
    let Some((header_row, body)) = rows.split_first() else {
        tracing::warn!("Sheet is empty");
        return Ok(DataFrame::default());
    };

    let mut existing_names = HashSet::new();
    let headers: Vec<String> = header_row
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let raw = cell_text(cell).unwrap_or_default();
            clean_column_name(&raw, idx, &mut existing_names)
        })
        .collect();

    let empty = Data::Empty;
    let mut columns = Vec::with_capacity(headers.len());
    for (col_idx, header) in headers.iter().enumerate() {
        let values: Vec<&Data> = body
            .iter()
            .map(|row| row.get(col_idx).unwrap_or(&empty))
            .collect();
        columns.push(build_series(header, &values)?);
    }

    DataFrame::new(columns).map_err(AppError::from)
}

fn detect_column_kind(values: &[&Data]) -> ColumnKind {
    let mut kind: Option<ColumnKind> = None;
    for value in values.iter().filter(|v| !matches!(v, Data::Empty)) {
        let cell_kind = match value {
            Data::Int(_) => ColumnKind::Integer,
            Data::Float(_) => ColumnKind::Float,
            Data::DateTime(_) | Data::DateTimeIso(_) if cell_datetime(value).is_some() => ColumnKind::Date,
            _ => return ColumnKind::Text,
        };
        kind = match (kind, cell_kind) {
            (None, k) => Some(k),
            (Some(a), b) if a == b => Some(a),
            (Some(ColumnKind::Integer), ColumnKind::Float) | (Some(ColumnKind::Float), ColumnKind::Integer) => {
                Some(ColumnKind::Float)
            }
            _ => return ColumnKind::Text,
        };
    }
    kind.unwrap_or(ColumnKind::Text)
}

fn build_series(name: &str, values: &[&Data]) -> AppResult<Series> {
    let series = match detect_column_kind(values) {
        ColumnKind::Integer => {
            let ints: Vec<Option<i64>> = values
                .iter()
                .map(|v| match v {
                    Data::Int(i) => Some(*i),
                    _ => None,
                })
                .collect();
            Series::new(name, ints)
        }
        ColumnKind::Float => {
            let nums: Vec<Option<f64>> = values
                .iter()
                .map(|v| match v {
                    Data::Float(f) => Some(*f),
                    Data::Int(i) => Some(*i as f64),
                    _ => None,
                })
                .collect();
            Series::new(name, nums)
        }
        ColumnKind::Date => {
            let millis: Vec<Option<i64>> = values
                .iter()
                .map(|v| cell_datetime(v).map(|ts| ts.and_utc().timestamp_millis()))
                .collect();
            Series::new(name, millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
        }
        ColumnKind::Text => {
            let strings: Vec<Option<String>> = values.iter().map(|v| cell_text(v)).collect();
            Series::new(name, strings)
        }
    };
    Ok(series)
}
