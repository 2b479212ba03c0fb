use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("csv export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet export failed: {0}")]
    Spreadsheet(String),
    #[error("pdf export failed: {0}")]
    Pdf(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
