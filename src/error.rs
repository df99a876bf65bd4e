use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoliyaError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Settings error: {0}")]
    Settings(String),

    /// Rejected user input. Nothing has been written when this is returned.
    #[error("{0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, MoliyaError>;
