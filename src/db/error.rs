use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid player import: {0}")]
    Import(#[from] serde_json::Error),

    #[error("Database connection lock poisoned")]
    Poisoned,
}

pub type StoreResult<T> = Result<T, StoreError>;
