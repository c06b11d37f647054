use std::path::PathBuf;

use polars::prelude::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Variavel de ambiente ausente: {0}")]
    MissingConfig(String),

    #[error("Valor invalido para {name}: {value}")]
    InvalidConfig { name: String, value: String },

    #[error("Arquivo nao encontrado: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Erro ao ler planilha: {0}")]
    Spreadsheet(String),

    #[error("Colunas esperadas nao encontradas no dataframe: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Nao ha dados validos de {0}.")]
    EmptyResult(String),

    #[error("Erro de banco de dados: {0}")]
    Database(#[from] mysql::Error),

    #[error("Erro de dataframe: {0}")]
    DataFrame(#[from] PolarsError),
}

impl From<calamine::XlsxError> for AppError {
    fn from(err: calamine::XlsxError) -> Self {
        AppError::Spreadsheet(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
