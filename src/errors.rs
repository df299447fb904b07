//! Unified application error type.
//! All modules (settings, ledger, core, web, cli) return AppError to keep the
//! error handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / serialization
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Spreadsheet
    // ---------------------------
    #[error("Spreadsheet write error: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Spreadsheet read error: {0}")]
    XlsxRead(#[from] calamine::XlsxError),

    // ---------------------------
    // Workflow errors
    // ---------------------------
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Persistence(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Unauthorized")]
    Unauthorized,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// HTTP status code used when the error reaches the web layer.
    pub fn status(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::InvalidDate(_) => 400,
            AppError::Unauthorized => 401,
            AppError::NotFound(_) => 404,
            _ => 500,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
