use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file or table could not be opened or read.
    #[error("Storage unavailable ({}): {source}", .path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("Invalid table name: {0:?}")]
    InvalidTable(String),
}
