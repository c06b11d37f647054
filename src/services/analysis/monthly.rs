use chrono::Datelike;
use polars::prelude::*;

use super::coerce::{numbers, require_columns, timestamps};
use crate::error::{AppError, AppResult};
use crate::models::{MonthlyCount, MonthlyPayment};

pub const PURCHASED_AT: &str = "order_purchase_timestamp";
pub const TOTAL_PAYMENT: &str = "total_payment";

const MONTH: &str = "mes";
const ORDERS: &str = "pedidos";
const TOTAL: &str = "total";

/// Month of year with the most orders. Years are merged; ties go to the
/// lowest month number.
pub fn mode_by_order_count(df: &DataFrame) -> AppResult<MonthlyCount> {
    require_columns(df, &[PURCHASED_AT])?;

    let months: Vec<u32> = timestamps(df.column(PURCHASED_AT)?)?
        .into_iter()
        .flatten()
        .map(|ts| ts.month())
        .collect();
    if months.is_empty() {
        return Err(AppError::EmptyResult("compras".to_string()));
    }
    tracing::info!("Counting orders per month over {} of {} rows", months.len(), df.height());

    let ones = vec![1i64; months.len()];
    let grouped = df!(MONTH => months, ORDERS => ones)?
        .lazy()
        .group_by([col(MONTH)])
        .agg([col(ORDERS).sum()])
        .collect()?;

    let months = grouped.column(MONTH)?.u32()?;
    let counts = grouped.column(ORDERS)?.i64()?;
    let (month, count) = top_month(
        months
            .into_iter()
            .zip(counts.into_iter())
            .filter_map(|(m, c)| Some((m?, c?))),
    )
    .ok_or_else(|| AppError::EmptyResult("compras".to_string()))?;

    Ok(MonthlyCount {
        month,
        count: count as u64,
    })
}

/// Month of year with the largest `total_payment` sum. Rows need both a valid
/// purchase timestamp and a numeric payment. Ties go to the lowest month.
pub fn month_by_total_payment(df: &DataFrame) -> AppResult<MonthlyPayment> {
    require_columns(df, &[PURCHASED_AT, TOTAL_PAYMENT])?;

    let purchased = timestamps(df.column(PURCHASED_AT)?)?;
    let payments = numbers(df.column(TOTAL_PAYMENT)?)?;

    let (months, totals): (Vec<u32>, Vec<f64>) = purchased
        .into_iter()
        .zip(payments)
        .filter_map(|pair| match pair {
            (Some(ts), Some(amount)) => Some((ts.month(), amount)),
            _ => None,
        })
        .unzip();
    if months.is_empty() {
        return Err(AppError::EmptyResult("pagamentos".to_string()));
    }
    tracing::info!("Summing payments per month over {} of {} rows", months.len(), df.height());

    let grouped = df!(MONTH => months, TOTAL => totals)?
        .lazy()
        .group_by([col(MONTH)])
        .agg([col(TOTAL).sum()])
        .collect()?;

    let months = grouped.column(MONTH)?.u32()?;
    let sums = grouped.column(TOTAL)?.f64()?;
    let (month, total) = top_month(
        months
            .into_iter()
            .zip(sums.into_iter())
            .filter_map(|(m, s)| Some((m?, s?))),
    )
    .ok_or_else(|| AppError::EmptyResult("pagamentos".to_string()))?;

    Ok(MonthlyPayment { month, total })
}

/// Largest value wins; equal values keep the lower month. Group order from
/// the aggregation does not matter.
fn top_month<T: PartialOrd + Copy>(groups: impl IntoIterator<Item = (u32, T)>) -> Option<(u32, T)> {
    groups.into_iter().fold(None, |best, (month, value)| match best {
        Some((best_month, best_value)) if best_value > value || (best_value == value && best_month < month) => {
            Some((best_month, best_value))
        }
        _ => Some((month, value)),
    })
}
