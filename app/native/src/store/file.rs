//! JSON file placement store.
//!
//! Each owner's set lives in `<dir>/<owner>.json`. Writes go to a temporary
//! file in the same directory which is then renamed over the target, so a
//! reader never sees a half-written document.

use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use super::{OwnerId, PlacementStore, StoreError, StoreResult};
use crate::grid::{Placement, PlacementSet};

/// Current on-disk document version.
const FORMAT_VERSION: u32 = 1;

/// On-disk representation of one owner's placements.
#[derive(Debug, Serialize, Deserialize)]
struct PlacementDocument {
    version: u32,
    owner: OwnerId,
    placements: Vec<Placement>,
}

/// Stores placement sets as JSON files in a directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`. The directory is created on first save.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    /// Returns the root directory.
    #[must_use]
    pub fn dir(&self) -> &Path { &self.dir }

    /// Returns the file path used for an owner.
    #[must_use]
    pub fn path_for(&self, owner: &OwnerId) -> PathBuf { self.dir.join(format!("{owner}.json")) }

    /// Lists owners that have a placement file, sorted by id.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the directory exists but cannot be read.
    pub fn owners(&self) -> StoreResult<Vec<OwnerId>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(StoreError::io(&self.dir, err)),
        };

        let mut owners: Vec<OwnerId> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    let stem = path.file_stem().and_then(|stem| stem.to_str())?;
                    OwnerId::new(stem).ok()
                } else {
                    None
                }
            })
            .collect();
        owners.sort();
        Ok(owners)
    }
}

impl PlacementStore for JsonFileStore {
    fn load(&self, owner: &OwnerId) -> StoreResult<PlacementSet> {
        let path = self.path_for(owner);
        let file = match fs::File::open(&path) {
            Ok(file) => file,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::trace!(%owner, "store: no placement file, starting empty");
                return Ok(PlacementSet::new());
            }
            Err(err) => return Err(StoreError::io(path, err)),
        };

        let document: PlacementDocument = serde_json::from_reader(BufReader::new(file))
            .map_err(|source| StoreError::Serialization {
                owner: owner.to_string(),
                source,
            })?;

        if document.version > FORMAT_VERSION {
            tracing::warn!(
                %owner,
                version = document.version,
                "store: placement file written by a newer version"
            );
        }
        if document.owner != *owner {
            tracing::warn!(
                %owner,
                stored = %document.owner,
                "store: placement file owner mismatch"
            );
        }

        Ok(PlacementSet::from_placements(document.placements))
    }

    fn save(&self, owner: &OwnerId, set: &PlacementSet) -> StoreResult<()> {
        fs::create_dir_all(&self.dir).map_err(|err| StoreError::io(&self.dir, err))?;

        let path = self.path_for(owner);
        let temp = NamedTempFile::new_in(&self.dir).map_err(|err| StoreError::io(&self.dir, err))?;

        let document = PlacementDocument {
            version: FORMAT_VERSION,
            owner: owner.clone(),
            placements: set.as_slice().to_vec(),
        };

        let mut writer = BufWriter::new(temp.as_file());
        serde_json::to_writer_pretty(&mut writer, &document).map_err(|source| {
            StoreError::Serialization {
                owner: owner.to_string(),
                source,
            }
        })?;
        writer.flush().map_err(|err| StoreError::io(temp.path(), err))?;
        drop(writer);
        temp.as_file().sync_all().map_err(|err| StoreError::io(temp.path(), err))?;

        temp.persist(&path).map_err(|err| StoreError::io(&path, err.error))?;
        tracing::debug!(
            %owner,
            path = %path.display(),
            count = set.len(),
            "store: placements saved"
        );
        Ok(())
    }
}
