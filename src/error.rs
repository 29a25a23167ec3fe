use thiserror::Error;

pub type DupontResult<T> = Result<T, DupontError>;

#[derive(Error, Debug)]
pub enum DupontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The input workbook could not be opened at all
    #[error("Workbook error: {0}")]
    Workbook(String),

    /// The output workbook could not be built or saved
    #[error("Export error: {0}")]
    Export(String),

    #[error("Sheet '{sheet}' could not be read: {reason}")]
    SheetParse { sheet: String, reason: String },

    #[error("Line item '{label}' not found in sheet '{sheet}'")]
    MissingLineItem { sheet: String, label: String },
}
