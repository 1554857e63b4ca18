use std::io;

/// Shared error vocabulary for the igo-route workspace.
///
/// Crate-local error enums convert into this one at their public boundary via
/// `#[from]`, the same split `butterfly-route` documents: `thiserror` inside
/// library code, `anyhow` only at the CLI boundary (see `igo-route`).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("fetch failed: {0}")]
    Fetch(String),

    #[error("failed to parse feed data: {0}")]
    Parse(String),

    #[error("cache I/O error: {0}")]
    Cache(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
