use crate::stations::error::FetchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SynopError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    // Covers writing the table and reading console input
    #[error("Terminal I/O failed")]
    Io(#[from] std::io::Error),
}
