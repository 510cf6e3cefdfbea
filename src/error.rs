/// Error type shared by the library, dataset loading and the filter engine
use thiserror::Error;

use crate::state::data::Field;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("malformed dataset: {0}")]
    Dataset(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two records share the same id
    #[error("duplicate movie id {0} in dataset")]
    DuplicateId(i64),

    /// A filter was submitted without any selected value
    #[error("no {0} selected")]
    NoSelection(Field),

    #[error("could not determine user data directory")]
    DataDirUnavailable,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
