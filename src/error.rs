use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

/// Backend faults. A missing note is never an error; it surfaces as
/// `None` or `false` from the store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("failed to create notes schema: {0}")]
    Migration(#[from] refinery::Error),

    #[error("stored timestamp {value:?} is not valid ISO-8601: {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
