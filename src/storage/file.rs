use super::{SessionStorage, StorageError, DEFAULT_KEY};
use crate::Session;
use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Keeps the snapshot in `<dir>/<key>.json`.
///
/// Saves write a temporary file next to the target and rename it into place,
/// so a crash halfway through never leaves a truncated snapshot behind.
#[derive(Debug, Clone, PartialEq)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        FileStorage::with_key(dir, DEFAULT_KEY)
    }

    pub fn with_key<P: Into<PathBuf>>(dir: P, key: &str) -> Self {
        let path = dir.into().join(format!("{}.json", key));
        FileStorage { path }
    }

    pub fn path(&self) -> &Path { &self.path }

    fn temp_path(&self) -> PathBuf { self.path.with_extension("json.tmp") }

    fn write_atomically(&self, contents: &str) -> Result<(), io::Error> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = self.temp_path();
        let mut f = fs::File::create(&temp)?;
        f.write_all(contents.as_bytes())?;
        f.sync_all()?;
        drop(f);

        fs::rename(&temp, &self.path)
    }
}

impl SessionStorage for FileStorage {
    fn load(&self) -> Result<Option<Session>, StorageError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No session snapshot at {}", self.path.display());
                return Ok(None);
            },
            Err(inner) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    inner,
                })
            },
        };

        super::decode(&raw)
    }

    fn save(&self, session: &Session) -> Result<(), StorageError> {
        let contents = super::encode(session)?;

        log::trace!("Writing the session snapshot to {}", self.path.display());
        self.write_atomically(&contents)
            .map_err(|inner| StorageError::Io {
                path: self.path.clone(),
                inner,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{credentials, User};

    #[test]
    fn missing_file_means_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        let got = storage.load().unwrap();

        assert_eq!(got, None);
    }

    #[test]
    fn blank_file_means_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        fs::write(storage.path(), "  \n").unwrap();

        let got = storage.load().unwrap();

        assert_eq!(got, None);
    }

    #[test]
    fn snapshots_survive_a_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested"));
        let session = Session::authenticated(User::new("7", "jane", "j@z.com"));

        storage.save(&session).unwrap();
        let got = storage.load().unwrap();

        assert_eq!(got, Some(session));
        assert!(!storage.temp_path().exists());
    }

    #[test]
    fn saving_replaces_the_previous_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::with_key(dir.path(), "custom");
        let admin = Session::authenticated(credentials::administrator());

        storage.save(&admin).unwrap();
        storage.save(&Session::anonymous()).unwrap();
        let got = storage.load().unwrap();

        assert_eq!(got, Some(Session::anonymous()));
        assert_eq!(storage.path(), dir.path().join("custom.json").as_path());
    }

    #[test]
    fn garbage_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        fs::write(storage.path(), "{ not json").unwrap();

        let got = storage.load();

        assert!(matches!(got, Err(StorageError::Serialization(_))));
    }
}
