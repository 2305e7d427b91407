//! On-disk catalog storage.
//!
//! The catalog is a pretty-printed JSON array. Every save replaces the
//! whole file through a temporary file in the same directory, so readers
//! see either the previous catalog or the new one.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use movielst_common::{Catalog, StoreError};
use tempfile::NamedTempFile;
use tracing::debug;

/// Owns the catalog file at one location.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Overwrite the stored catalog, creating parent directories as needed.
    pub fn save(&self, catalog: &Catalog) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(dir).map_err(|e| StoreError::io(dir, e))?;

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| StoreError::io(dir, e))?;
        serde_json::to_writer_pretty(&mut tmp, catalog)
            .map_err(|e| StoreError::io(&self.path, e.into()))?;
        tmp.write_all(b"\n")
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| StoreError::io(&self.path, e))?;

        tmp.persist(&self.path)
            .map_err(|e| StoreError::io(&self.path, e.error))?;

        debug!(path = %self.path.display(), records = catalog.len(), "Catalog saved");
        Ok(())
    }

    /// Read the stored catalog.
    ///
    /// A missing file is [`StoreError::NotIndexed`]; anything else that
    /// goes wrong is an I/O or corruption error.
    pub fn load(&self) -> Result<Catalog, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotIndexed {
                    path: self.path.clone(),
                })
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use movielst_common::{MetadataRecord, Rating};

    fn sample_catalog() -> Catalog {
        let mut heat = MetadataRecord::new("Heat");
        heat.year = "1995".into();
        heat.ratings.push(Rating {
            source: "Internet Movie Database".into(),
            value: "8.3/10".into(),
        });
        vec![heat, MetadataRecord::new("Inception")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("movies.json"));

        let catalog = sample_catalog();
        store.save(&catalog).unwrap();
        assert_eq!(store.load().unwrap(), catalog);
    }

    #[test]
    fn test_round_trip_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("movies.json"));

        store.save(&Catalog::new()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_replaces_previous_catalog() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("movies.json"));

        store.save(&sample_catalog()).unwrap();
        let smaller: Catalog = vec![MetadataRecord::new("Alien")].into_iter().collect();
        store.save(&smaller).unwrap();

        assert_eq!(store.load().unwrap(), smaller);
        // Only the catalog itself remains; the temporary file was renamed.
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("a").join("b").join("movies.json"));
        store.save(&sample_catalog()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_load_missing_is_not_indexed() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("movies.json"));

        let err = store.load().unwrap_err();
        assert!(err.is_not_indexed());
        assert_matches!(err, StoreError::NotIndexed { .. });
    }

    #[test]
    fn test_load_garbage_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("movies.json");
        fs::write(&path, "{ not json").unwrap();

        let err = CatalogStore::new(&path).load().unwrap_err();
        assert_matches!(err, StoreError::Corrupt { .. });
        assert!(!err.is_not_indexed());
    }

    #[test]
    fn test_load_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = CatalogStore::new(dir.path()).load().unwrap_err();
        assert_matches!(err, StoreError::Io { .. });
    }

    #[test]
    fn test_file_uses_stable_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = CatalogStore::new(dir.path().join("movies.json"));
        store.save(&sample_catalog()).unwrap();

        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.trim_start().starts_with('['));
        assert!(text.contains("\"Title\": \"Heat\""));
        assert!(text.contains("\"Response\": \"True\""));
        assert!(text.contains("\"imdbRating\""));
    }
}
