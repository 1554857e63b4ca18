use igo_common::Error as CommonError;
use thiserror::Error;

/// Engine-level error taxonomy. Per spec.md §7, almost everything below
/// this boundary is either retried forever (fetch/parse) or absorbed into
/// an `Option::None` (`resolve_location`, `shortest_path`); what's left is
/// startup-time failures that have no sensible retry (e.g. a cache
/// directory that can't be created).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Common(#[from] CommonError),

    #[error("fetch failed: {0}")]
    Fetch(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
