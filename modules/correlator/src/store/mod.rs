mod fs;

pub use fs::*;

use crate::model::HostMatchDocument;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// The persistence collaborator seam for run results.
///
/// A run's output wholesale replaces the previously stored set. Two
/// invariants bound correct use: at most one replace may be in flight at a
/// time (callers serialize runs), and a replace is all-or-nothing — a failed
/// write must leave the prior stored set intact and a partially written set
/// must never be observable to readers.
pub trait MatchStore {
    /// Atomically supersede the stored document set.
    fn replace_all(&self, documents: &[HostMatchDocument]) -> Result<(), Error>;

    /// Load the currently stored document set. An empty store yields an
    /// empty set.
    fn load(&self) -> Result<Vec<HostMatchDocument>, Error>;
}
