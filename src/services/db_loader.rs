use std::collections::HashSet;

use mysql::{prelude::Queryable, Conn, OptsBuilder, Value};
use polars::prelude::*;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::mappings::ALLOWED_TABLES;

pub const DEFAULT_PREVIEW_LIMIT: usize = 5;

/// Read access to the tables of the Olist database.
pub trait TableSource {
    fn list_tables(&mut self) -> AppResult<Vec<String>>;
    fn preview_table(&mut self, table_name: &str, limit: usize) -> AppResult<DataFrame>;
}

/// Owns one blocking MySQL connection. It is closed when the loader is dropped.
pub struct DbLoader {
    conn: Conn,
}

impl DbLoader {
    pub fn connect(config: &Config) -> AppResult<Self> {
        info!("Connecting to {}", config);
        let opts = OptsBuilder::new()
            .ip_or_hostname(Some(config.host.clone()))
            .tcp_port(config.port)
            .user(Some(config.user.clone()))
            .pass(Some(config.password.clone()))
            .db_name(Some(config.database.clone()));

        let conn = Conn::new(opts).map_err(|e| {
            error!("Failed to connect to database: {}", e);
            AppError::Database(e)
        })?;
        debug!("Successfully connected to {}", config.database);
        Ok(Self { conn })
    }
}

impl TableSource for DbLoader {
    fn list_tables(&mut self) -> AppResult<Vec<String>> {
        let available: Vec<String> = self.conn.query("SHOW TABLES;")?;
        debug!("Database reports tables: {:?}", available);
        Ok(filter_allowed_tables(&available))
    }

    /// Only pass allow-listed names: the name is interpolated into the query.
    fn preview_table(&mut self, table_name: &str, limit: usize) -> AppResult<DataFrame> {
        let sql = preview_query(table_name, limit);
        debug!("Running {}", sql);

        let mut result = self.conn.query_iter(sql)?;
        let headers: Vec<String> = result
            .columns()
            .as_ref()
            .iter()
            .map(|column| column.name_str().into_owned())
            .collect();

        let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
        for row in result.by_ref() {
            let row = row?;
            for (idx, column) in values.iter_mut().enumerate() {
                column.push(row.as_ref(idx).and_then(value_to_string));
            }
        }

        let series: Vec<Series> = headers
            .iter()
            .zip(values)
            .map(|(name, column)| Series::new(name, column))
            .collect();
        Ok(DataFrame::new(series)?)
    }
}

/// Keeps the allow-listed names present in `available`, in allow-list order.
pub fn filter_allowed_tables(available: &[String]) -> Vec<String> {
    let available: HashSet<&str> = available.iter().map(String::as_str).collect();
    ALLOWED_TABLES
        .iter()
        .filter(|name| available.contains(*name))
        .map(|name| name.to_string())
        .collect()
}

pub fn preview_query(table_name: &str, limit: usize) -> String {
    format!("SELECT * FROM `{}` LIMIT {}", table_name, limit)
}

fn value_to_string(value: &Value) -> Option<String> {
    match value {
        Value::NULL => None,
        Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
        Value::Int(v) => Some(v.to_string()),
        Value::UInt(v) => Some(v.to_string()),
        Value::Float(v) => Some(v.to_string()),
        Value::Double(v) => Some(v.to_string()),
        Value::Date(year, month, day, 0, 0, 0, 0) => Some(format!("{:04}-{:02}-{:02}", year, month, day)),
        Value::Date(year, month, day, hour, minute, second, _) => Some(format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            year, month, day, hour, minute, second
        )),
        Value::Time(negative, days, hours, minutes, seconds, _) => {
            let sign = if *negative { "-" } else { "" };
            let hours = *days * 24 + u32::from(*hours);
            Some(format!("{}{:02}:{:02}:{:02}", sign, hours, minutes, seconds))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn keeps_allow_list_order() {
        let available = names(&[
            "olist_sellers_datase",
            "olist_orders_dataset",
            "olist_customers_dataset",
        ]);
        assert_eq!(
            filter_allowed_tables(&available),
            names(&[
                "olist_customers_dataset",
                "olist_orders_dataset",
                "olist_sellers_datase",
            ])
        );
    }

    #[test]
    fn drops_unknown_and_absent_tables() {
        let available = names(&["product_category_name_translation", "olist_sellers_dataset", "olist_products_dataset"]);
        let tables = filter_allowed_tables(&available);
        assert_eq!(tables, names(&["olist_products_dataset"]));
        assert!(tables.iter().all(|t| ALLOWED_TABLES.contains(&t.as_str())));
        assert!(tables.iter().all(|t| available.contains(t)));
    }

    #[test]
    fn nothing_matches_an_empty_database() {
        assert!(filter_allowed_tables(&[]).is_empty());
    }

    #[test]
    fn preview_query_is_bounded_and_quoted() {
        assert_eq!(
            preview_query("olist_orders_dataset", DEFAULT_PREVIEW_LIMIT),
            "SELECT * FROM `olist_orders_dataset` LIMIT 5"
        );
    }

    #[test]
    fn renders_mysql_values() {
        assert_eq!(value_to_string(&Value::NULL), None);
        assert_eq!(value_to_string(&Value::Bytes(b"SP".to_vec())), Some("SP".to_string()));
        assert_eq!(value_to_string(&Value::Int(-3)), Some("-3".to_string()));
        assert_eq!(
            value_to_string(&Value::Date(2018, 8, 29, 0, 0, 0, 0)),
            Some("2018-08-29".to_string())
        );
        assert_eq!(
            value_to_string(&Value::Date(2018, 8, 29, 15, 0, 37, 0)),
            Some("2018-08-29 15:00:37".to_string())
        );
        assert_eq!(
            value_to_string(&Value::Time(true, 1, 2, 3, 4, 0)),
            Some("-26:03:04".to_string())
        );
    }
}
