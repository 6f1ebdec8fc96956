use super::{Error, MatchStore};
use crate::model::HostMatchDocument;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

const SNAPSHOT: &str = "matches.json";

/// A filesystem backed store.
///
/// The document set lives in a single snapshot file under the base
/// directory. A replace writes the new set to a temporary file in the same
/// directory and renames it over the live snapshot, so readers observe
/// either the old set or the new one, never a partial write, and a failed
/// write leaves the old snapshot in place.
#[derive(Clone, Debug)]
pub struct FileSystemStore {
    base: PathBuf,
}

impl FileSystemStore {
    pub fn new(base: impl Into<PathBuf>) -> std::io::Result<Self> {
        let base = base.into();
        std::fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    fn snapshot(&self) -> PathBuf {
        self.base.join(SNAPSHOT)
    }

    /// Create a store in a fresh temporary directory, for testing.
    pub fn for_test() -> anyhow::Result<(Self, tempfile::TempDir)> {
        let dir = tempfile::tempdir()?;
        let store = Self::new(dir.path())?;
        Ok((store, dir))
    }
}

impl MatchStore for FileSystemStore {
    fn replace_all(&self, documents: &[HostMatchDocument]) -> Result<(), Error> {
        // staged in the same directory, so the rename is atomic
        let mut staging = NamedTempFile::new_in(&self.base)?;
        serde_json::to_writer_pretty(&mut staging, documents)?;
        staging.flush()?;
        staging
            .persist(self.snapshot())
            .map_err(|err| Error::Io(err.error))?;

        log::debug!(
            "replaced stored match set: {} document(s) at {}",
            documents.len(),
            self.snapshot().display()
        );
        Ok(())
    }

    fn load(&self) -> Result<Vec<HostMatchDocument>, Error> {
        match std::fs::read(self.snapshot()) {
            Ok(data) => Ok(serde_json::from_slice(&data)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }
}
