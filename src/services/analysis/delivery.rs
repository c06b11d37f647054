use polars::prelude::*;

use super::coerce::{require_columns, timestamps};
use crate::error::{AppError, AppResult};
use crate::models::DeliveryStats;

pub const APPROVED_AT: &str = "order_approved_at";
pub const DELIVERED_AT: &str = "order_delivered_customer_date";

const SECONDS_PER_DAY: f64 = 86_400.0;
const DAYS: &str = "dias";

/// Mean and median days from approval to customer delivery.
///
/// Rows where either timestamp is missing or unparseable are dropped. Both
/// statistics are rounded half-to-even, so 2.5 days reports as 2.
pub fn compute_delivery_time(df: &DataFrame) -> AppResult<DeliveryStats> {
    require_columns(df, &[APPROVED_AT, DELIVERED_AT])?;

    let approved = timestamps(df.column(APPROVED_AT)?)?;
    let delivered = timestamps(df.column(DELIVERED_AT)?)?;

    let days: Vec<f64> = approved
        .iter()
        .zip(&delivered)
        .filter_map(|pair| match pair {
            (Some(approved), Some(delivered)) => {
                let elapsed = (*delivered - *approved).num_milliseconds() as f64 / 1000.0;
                Some(elapsed / SECONDS_PER_DAY)
            }
            _ => None,
        })
        .collect();

    if days.is_empty() {
        tracing::error!("No rows with both {} and {}", APPROVED_AT, DELIVERED_AT);
        return Err(AppError::EmptyResult("entregas".to_string()));
    }
    let valid_count = days.len();
    tracing::info!("Computing delivery time over {} of {} rows", valid_count, df.height());

    let summary = df!(DAYS => days)?
        .lazy()
        .select([
            col(DAYS).mean().alias("media"),
            col(DAYS).median().alias("mediana"),
        ])
        .collect()?;

    Ok(DeliveryStats {
        mean_days: round_days(first_f64(&summary, "media")?),
        median_days: round_days(first_f64(&summary, "mediana")?),
        valid_count,
    })
}

/// Round half to even: 0.5 -> 0, 1.5 -> 2, 2.5 -> 2.
pub fn round_days(days: f64) -> i64 {
    days.round_ties_even() as i64
}

fn first_f64(frame: &DataFrame, column: &str) -> AppResult<f64> {
    frame
        .column(column)?
        .f64()?
        .get(0)
        .ok_or_else(|| AppError::EmptyResult("entregas".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orders(approved: &[Option<&str>], delivered: &[Option<&str>]) -> DataFrame {
        df!(APPROVED_AT => approved, DELIVERED_AT => delivered).unwrap()
    }

    #[test]
    fn rounds_half_to_even() {
        assert_eq!(round_days(2.5), 2);
        assert_eq!(round_days(3.5), 4);
        assert_eq!(round_days(2.4999), 2);
        assert_eq!(round_days(-1.5), -2);
    }

    #[test]
    fn mean_and_median_over_valid_rows() {
        let df = orders(
            &[
                Some("2022-01-01T00:00:00"),
                Some("2022-01-01T00:00:00"),
                Some("2022-01-01T00:00:00"),
            ],
            &[
                Some("2022-01-05T00:00:00"),
                Some("2022-01-02T00:00:00"),
                Some("entregue?"),
            ],
        );
        let stats = compute_delivery_time(&df).unwrap();
        // 4.0 and 1.0 days: 2.5 rounds to 2 for both statistics.
        assert_eq!(
            stats,
            DeliveryStats {
                mean_days: 2,
                median_days: 2,
                valid_count: 2,
            }
        );
    }

    #[test]
    fn median_differs_from_mean() {
        let df = orders(
            &[
                Some("2022-03-01 00:00:00"),
                Some("2022-03-01 00:00:00"),
                Some("2022-03-01 00:00:00"),
                None,
            ],
            &[
                Some("2022-03-02 00:00:00"),
                Some("2022-03-03 00:00:00"),
                Some("2022-03-21 00:00:00"),
                Some("2022-03-21 00:00:00"),
            ],
        );
        let stats = compute_delivery_time(&df).unwrap();
        // 1, 2 and 20 days.
        assert_eq!(stats.mean_days, 8);
        assert_eq!(stats.median_days, 2);
        assert_eq!(stats.valid_count, 3);
    }

    #[test]
    fn fractional_days_are_kept_before_rounding() {
        let df = orders(&[Some("2022-01-01 00:00:00")], &[Some("2022-01-02 18:00:00")]);
        let stats = compute_delivery_time(&df).unwrap();
        assert_eq!(stats.mean_days, 2);
    }

    #[test]
    fn all_invalid_rows_is_an_empty_result() {
        let df = orders(&[Some("x"), None], &[Some("2022-01-02"), Some("y")]);
        assert!(matches!(
            compute_delivery_time(&df),
            Err(AppError::EmptyResult(_))
        ));
    }

    #[test]
    fn missing_columns_are_named() {
        let df = df!("order_id" => &["a"]).unwrap();
        match compute_delivery_time(&df) {
            Err(AppError::MissingColumns(missing)) => {
                assert_eq!(missing, vec![APPROVED_AT.to_string(), DELIVERED_AT.to_string()])
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_column_is_reported_before_type_problems() {
        // The approval column exists but holds booleans; the missing delivery
        // column must still be the reported error.
        let df = df!(APPROVED_AT => &[true]).unwrap();
        match compute_delivery_time(&df) {
            Err(AppError::MissingColumns(missing)) => assert_eq!(missing, vec![DELIVERED_AT.to_string()]),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
