use polars::prelude::*;

use crate::error::AppResult;
use crate::mappings::{lookup_or_default, PAYMENT_TYPE_MAP, RENAME_MAP, STATUS_MAP};

pub const STATUS_COLUMN: &str = "status_pedido";
pub const PAYMENT_TYPE_COLUMN: &str = "tipo_pagamento";

/// Renames the columns and remaps the categorical values to Portuguese.
pub fn translate_dataset(df: &mut DataFrame) -> AppResult<()> {
    rename_columns(df, RENAME_MAP)?;
    remap_column(df, STATUS_COLUMN, STATUS_MAP)?;
    remap_column(df, PAYMENT_TYPE_COLUMN, PAYMENT_TYPE_MAP)?;
    Ok(())
}

/// Applies `map` to every column label. Unmapped labels are kept, and a rename
/// that would collide with an existing column is skipped.
pub fn rename_columns(df: &mut DataFrame, map: &[(&str, &str)]) -> AppResult<()> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect();

    for name in &names {
        let target = lookup_or_default(map, name);
        if target == name {
            continue;
        }
        if names.iter().any(|existing| existing == target) {
            tracing::warn!("Skipping rename {} -> {}: column already exists", name, target);
            continue;
        }
        tracing::debug!("Renaming column {} -> {}", name, target);
        df.rename(name, target)?;
    }
    Ok(())
}

/// Replaces each value of `column` through `map`. Absent or non-text columns
/// are left alone; unmapped values pass through.
pub fn remap_column(df: &mut DataFrame, column: &str, map: &[(&str, &str)]) -> AppResult<()> {
    let Ok(series) = df.column(column) else {
        tracing::debug!("Column {} not present, skipping remap", column);
        return Ok(());
    };
    let Ok(values) = series.str() else {
        tracing::warn!("Column {} is {} not text, skipping remap", column, series.dtype());
        return Ok(());
    };

    let remapped: Vec<Option<String>> = values
        .into_iter()
        .map(|value| value.map(|v| lookup_or_default(map, v).to_string()))
        .collect();

    df.replace(column, Series::new(column, remapped))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_values(df: &DataFrame, column: &str) -> Vec<Option<String>> {
        df.column(column)
            .unwrap()
            .str()
            .unwrap()
            .into_iter()
            .map(|v| v.map(str::to_string))
            .collect()
    }

    fn orders() -> DataFrame {
        df!(
            "order_id" => &["a", "b", "c", "d"],
            "order_status" => &[Some("delivered"), Some("canceled"), Some("lost"), None],
            "payment_type" => &["credit_card", "boleto", "pix", "voucher"],
            "total_payment" => &[10.0, 20.0, 30.0, 40.0]
        )
        .unwrap()
    }

    #[test]
    fn renames_known_columns_and_keeps_the_rest() {
        let mut df = orders();
        rename_columns(&mut df, RENAME_MAP).unwrap();
        assert_eq!(
            df.get_column_names(),
            &["order_id", "status_pedido", "tipo_pagamento", "pagamento_total"]
        );
    }

    #[test]
    fn renaming_translated_columns_is_a_no_op() {
        let mut df = orders();
        translate_dataset(&mut df).unwrap();
        let before = df.clone();
        rename_columns(&mut df, RENAME_MAP).unwrap();
        assert!(df.equals_missing(&before));
    }

    #[test]
    fn rename_never_creates_duplicate_columns() {
        let mut df = df!(
            "order_status" => &["delivered"],
            "status_pedido" => &["entregue"]
        )
        .unwrap();
        rename_columns(&mut df, RENAME_MAP).unwrap();
        assert_eq!(df.get_column_names(), &["order_status", "status_pedido"]);
    }

    #[test]
    fn remaps_categorical_values_with_passthrough() {
        let mut df = orders();
        translate_dataset(&mut df).unwrap();

        assert_eq!(df.height(), 4);
        assert_eq!(
            text_values(&df, STATUS_COLUMN),
            vec![
                Some("entregue".to_string()),
                Some("cancelado".to_string()),
                Some("lost".to_string()),
                None,
            ]
        );
        assert_eq!(
            text_values(&df, PAYMENT_TYPE_COLUMN),
            vec![
                Some("cartao_credito".to_string()),
                Some("boleto".to_string()),
                Some("pix".to_string()),
                Some("voucher".to_string()),
            ]
        );
    }

    #[test]
    fn remapped_values_stay_within_targets_or_originals() {
        let original = orders();
        let mut df = original.clone();
        translate_dataset(&mut df).unwrap();

        let sources = text_values(&original, "order_status");
        for (before, after) in sources.iter().zip(text_values(&df, STATUS_COLUMN)) {
            match (before, after) {
                (Some(b), Some(a)) => {
                    assert!(a == *b || STATUS_MAP.iter().any(|(s, t)| s == b && *t == a));
                }
                (None, None) => {}
                other => panic!("value changed nullness: {other:?}"),
            }
        }
    }

    #[test]
    fn absent_categorical_columns_are_skipped() {
        let mut df = df!("order_id" => &["a"], "price" => &[1.5]).unwrap();
        translate_dataset(&mut df).unwrap();
        assert_eq!(df.get_column_names(), &["order_id", "preco"]);
    }

    #[test]
    fn non_text_status_column_is_left_untouched() {
        let mut df = df!(STATUS_COLUMN => &[1i64, 2]).unwrap();
        remap_column(&mut df, STATUS_COLUMN, STATUS_MAP).unwrap();
        assert_eq!(df.column(STATUS_COLUMN).unwrap().dtype(), &DataType::Int64);
    }
}
