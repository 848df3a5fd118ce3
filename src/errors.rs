use thiserror::Error;

/// Unified error type covering the remote adapter, the cache store, and
/// application setup.
#[derive(Debug, Error)]
pub enum Error {
    /// Transport failure or non-success status from the upstream catalog API.
    #[error("Remote catalog error: {message}")]
    Remote {
        /// Description of the transport failure or HTTP status
        message: String,
    },

    /// The upstream API reported that the requested product does not exist.
    #[error("Product {id} not found upstream")]
    NotFound {
        /// Product id that was requested
        id: i64,
    },

    /// A cache write failed; the fetched record could not be mirrored locally.
    #[error("Cache write error: {0}")]
    Store(#[source] sea_orm::DbErr),

    /// Neither the remote source nor the local cache could produce data.
    /// The message is user-visible text describing what is missing.
    #[error("{message}")]
    NoDataAvailable {
        /// User-facing description of the empty outcome
        message: String,
    },

    /// Configuration file or environment problem.
    #[error("Configuration error: {message}")]
    Config {
        /// What was malformed or missing
        message: String,
    },

    /// Database error outside the cache write path (connection, schema, reads).
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O error while preparing the database location.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for Error {
    fn from(value: reqwest::Error) -> Self {
        Error::Remote {
            message: value.to_string(),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
