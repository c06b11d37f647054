use std::fmt;

use dotenvy::dotenv;

use crate::error::{AppError, AppResult};

pub const DB_HOST: &str = "DB_HOST";
pub const DB_PORT: &str = "DB_PORT";
pub const DB_USER: &str = "DB_USER";
pub const DB_PASSWORD: &str = "DB_PASSWORD";
pub const DB_NAME: &str = "DB_NAME";

/// Default spreadsheet export read by the analysis commands.
pub const DEFAULT_DATA_FILE: &str = "dados_banco.xlsx";

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        // Load .env file first
        dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from an arbitrary source. Missing and empty values are
    /// both reported as missing, in declaration order.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &str| -> AppResult<String> {
            match lookup(name) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                _ => Err(AppError::MissingConfig(name.to_string())),
            }
        };

        let host = require(DB_HOST)?;
        let port_raw = require(DB_PORT)?;
        let user = require(DB_USER)?;
        let password = require(DB_PASSWORD)?;
        let database = require(DB_NAME)?;

        let port = port_raw.trim().parse::<u16>().map_err(|_| AppError::InvalidConfig {
            name: DB_PORT.to_string(),
            value: port_raw.clone(),
        })?;

        Ok(Config {
            host,
            port,
            user,
            password,
            database,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &"***")
            .field("database", &self.database)
            .finish()
    }
}

/// Connection string with the password masked, safe to log.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mysql+mysql://{}:***@{}:{}/{}",
            self.user, self.host, self.port, self.database
        )
    }
}
