//! Patient snapshot storage
//!
//! Every stored patient lives in one [`Snapshot`], held in memory and, when a path is
//! configured, mirrored to a JSON file. Writes run against a copy of the snapshot; the
//! copy only replaces the live one after it has been written to disk, so a failed write
//! leaves both memory and disk as they were.
//!
//! Several processes may share one snapshot file. A write takes an exclusive lock on a
//! `<snapshot>.lock` file next to it, reloads the snapshot from disk and holds the lock
//! until the new snapshot has been renamed into place.

use std::{
    collections::BTreeMap,
    ffi::OsString,
    fs::{File, OpenOptions},
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::Arc,
};

use clinic::{
    ids::PatientId,
    patients::{IdAlreadyAssigned, PatientRecord},
};
use serde::{Deserialize, Serialize, de::Error as _};
use thiserror::Error;
use tokio::{fs, sync::RwLock, task};

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No patient under the requested id.
    #[error("patient not found")]
    NotFound,

    /// Another stored patient already uses this value for a unique field.
    #[error("another patient already has this {field}")]
    UniqueViolation {
        /// Name of the clashing field.
        field: &'static str,
    },

    /// The record has never been persisted, so it cannot be replaced.
    #[error("patient has not been persisted")]
    Unpersisted,

    /// The record already carries an identifier.
    #[error("patient already persisted")]
    AlreadyPersisted(#[from] IdAlreadyAssigned),

    /// Reading or writing the snapshot file failed.
    #[error("failed to access snapshot file {path}")]
    Io {
        /// Snapshot file path.
        path: PathBuf,

        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The snapshot file could not be decoded.
    #[error("failed to decode snapshot file {path}")]
    Decode {
        /// Snapshot file path.
        path: PathBuf,

        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot could not be encoded.
    #[error("failed to encode snapshot")]
    Encode(#[source] serde_json::Error),
}

/// All stored patients, keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub(crate) patients: BTreeMap<PatientId, PatientRecord>,
}

impl Snapshot {
    /// Number of stored patients, active or not.
    pub fn len(&self) -> usize {
        self.patients.len()
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    fn check_keys(&self) -> Result<(), serde_json::Error> {
        match self
            .patients
            .iter()
            .find(|(key, patient)| patient.id() != Some(**key))
        {
            Some((key, _)) => Err(serde_json::Error::custom(format!(
                "patient stored under {key} carries a different id"
            ))),
            None => Ok(()),
        }
    }
}

/// Exclusive advisory lock on a snapshot file, released on drop.
#[derive(Debug)]
struct SnapshotLock {
    _file: File,
}

impl SnapshotLock {
    async fn acquire(snapshot: &Path) -> Result<Self, StoreError> {
        let path = sibling(snapshot, ".lock");
        let target = path.clone();

        let locked = task::spawn_blocking(move || {
            let file = OpenOptions::new()
                .create(true)
                .truncate(false)
                .write(true)
                .open(&target)?;

            file.lock()?;

            Ok::<_, io::Error>(file)
        })
        .await
        .map_err(io::Error::other)
        .and_then(|result| result);

        match locked {
            Ok(file) => Ok(Self { _file: file }),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);

    PathBuf::from(name)
}

async fn load(path: &Path) -> Result<Snapshot, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(error) if error.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "snapshot file missing, starting empty");

            return Ok(Snapshot::default());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_slice::<Snapshot>(&bytes)
        .and_then(|snapshot| snapshot.check_keys().map(|()| snapshot))
        .map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
}

async fn persist(path: &Path, snapshot: &Snapshot) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec_pretty(snapshot).map_err(StoreError::Encode)?;
    let staging = sibling(path, ".tmp");

    let written = match fs::write(&staging, bytes).await {
        Ok(()) => fs::rename(&staging, path).await,
        Err(error) => Err(error),
    };

    if let Err(source) = written {
        if let Err(error) = fs::remove_file(&staging).await {
            if error.kind() != ErrorKind::NotFound {
                tracing::warn!(path = %staging.display(), %error, "failed to remove staging file");
            }
        }

        return Err(StoreError::Io {
            path: path.to_path_buf(),
            source,
        });
    }

    tracing::trace!(path = %path.display(), patients = snapshot.len(), "persisted snapshot");

    Ok(())
}

#[derive(Debug)]
struct StoreInner {
    path: Option<PathBuf>,
    snapshot: RwLock<Snapshot>,
}

/// Shared handle to the patient snapshot.
#[derive(Debug, Clone)]
pub struct Store {
    inner: Arc<StoreInner>,
}

impl Store {
    /// A store that never touches disk.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_snapshot(None, Snapshot::default())
    }

    /// Open the snapshot at `path`, starting empty if the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or decoded, or if a
    /// patient is stored under a key that is not its own id.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let snapshot = load(&path).await?;

        tracing::debug!(
            path = %path.display(),
            patients = snapshot.len(),
            "opened patient snapshot"
        );

        Ok(Self::with_snapshot(Some(path), snapshot))
    }

    fn with_snapshot(path: Option<PathBuf>, snapshot: Snapshot) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path,
                snapshot: RwLock::new(snapshot),
            }),
        }
    }

    /// Snapshot file path, if the store is file-backed.
    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }

    /// Run `f` against the current snapshot.
    pub async fn read<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&Snapshot) -> T + Send,
    {
        let snapshot = self.inner.snapshot.read().await;

        f(&snapshot)
    }

    /// Run `f` against a copy of the snapshot and keep the copy if `f` succeeds and the
    /// copy reaches disk.
    ///
    /// File-backed stores reload the snapshot from disk under the file lock first, so
    /// `f` sees writes made by other processes since the store was opened.
    ///
    /// # Errors
    ///
    /// Returns whatever `f` returns, or a [`StoreError`] if locking, reloading or
    /// persisting fails.
    pub async fn write<T, E, F>(&self, f: F) -> Result<T, E>
    where
        F: FnOnce(&mut Snapshot) -> Result<T, E> + Send,
        E: From<StoreError>,
    {
        let mut snapshot = self.inner.snapshot.write().await;

        let _lock = match &self.inner.path {
            Some(path) => {
                let lock = SnapshotLock::acquire(path).await?;
                *snapshot = load(path).await?;

                Some(lock)
            }
            None => None,
        };

        let mut next = snapshot.clone();
        let value = f(&mut next)?;

        if let Some(path) = &self.inner.path {
            persist(path, &next).await?;
        }

        *snapshot = next;

        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::fixtures::stored_patient;

    use super::*;

    #[tokio::test]
    async fn open_missing_file_starts_empty() -> TestResult {
        let dir = tempfile::tempdir()?;

        let store = Store::open(dir.path().join("patients.json")).await?;

        assert!(store.read(Snapshot::is_empty).await);

        Ok(())
    }

    #[tokio::test]
    async fn open_rejects_corrupt_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patients.json");

        std::fs::write(&path, "not json")?;

        let result = Store::open(&path).await;

        assert!(
            matches!(result, Err(StoreError::Decode { .. })),
            "expected Decode, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn written_snapshot_survives_reopen() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patients.json");
        let patient = stored_patient()?;
        let id = patient.id().ok_or("fixture should be persisted")?;

        let store = Store::open(&path).await?;

        store
            .write(|snapshot| {
                snapshot.patients.insert(id, patient);

                Ok::<_, StoreError>(())
            })
            .await?;

        let reopened = Store::open(&path).await?;

        let name = reopened
            .read(|snapshot| snapshot.patients.get(&id).map(|p| p.name().to_string()))
            .await;

        assert_eq!(name.as_deref(), Some("Ana"));

        Ok(())
    }

    #[tokio::test]
    async fn failed_write_keeps_previous_snapshot() -> TestResult {
        let store = Store::in_memory();
        let patient = stored_patient()?;
        let id = patient.id().ok_or("fixture should be persisted")?;

        let result = store
            .write(|snapshot| {
                snapshot.patients.insert(id, patient);

                Err::<(), _>(StoreError::NotFound)
            })
            .await;

        assert!(result.is_err());
        assert!(store.read(Snapshot::is_empty).await);

        Ok(())
    }

    #[tokio::test]
    async fn open_rejects_patient_under_foreign_key() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patients.json");

        let mut snapshot = Snapshot::default();
        snapshot
            .patients
            .insert(PatientId::generate(), stored_patient()?);

        std::fs::write(&path, serde_json::to_vec(&snapshot)?)?;

        let result = Store::open(&path).await;

        assert!(
            matches!(result, Err(StoreError::Decode { .. })),
            "expected Decode, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn write_reloads_changes_from_other_handles() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patients.json");

        let first = Store::open(&path).await?;
        let second = Store::open(&path).await?;

        for store in [&first, &second] {
            let patient = stored_patient()?;
            let id = patient.id().ok_or("fixture should be persisted")?;

            store
                .write(|snapshot| {
                    snapshot.patients.insert(id, patient);

                    Ok::<_, StoreError>(())
                })
                .await?;
        }

        let reopened = Store::open(&path).await?;

        assert_eq!(reopened.read(Snapshot::len).await, 2);
        assert_eq!(second.read(Snapshot::len).await, 2);

        Ok(())
    }

    #[tokio::test]
    async fn failed_rename_removes_staging_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("patients.json");

        std::fs::create_dir(&path)?;
        std::fs::write(path.join("occupied"), "")?;

        let result = persist(&path, &Snapshot::default()).await;

        assert!(
            matches!(result, Err(StoreError::Io { .. })),
            "expected Io, got {result:?}"
        );
        assert!(
            !dir.path().join("patients.json.tmp").exists(),
            "staging file should be removed"
        );

        Ok(())
    }

    #[tokio::test]
    async fn in_memory_store_has_no_path() {
        assert!(Store::in_memory().path().is_none());
    }
}
