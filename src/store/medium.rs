use crate::error::MediumError;
use ahash::AHashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A string key-value medium the prefill store persists into.
pub trait KeyValueMedium: Send {
    fn read(&self, key: &str) -> Result<Option<String>, MediumError>;
    fn write(&mut self, key: &str, value: &str) -> Result<(), MediumError>;

    /// Whether values survive the process.
    fn is_durable(&self) -> bool {
        false
    }
}

/// Process-local medium. Identical semantics, no durability.
#[derive(Debug, Default, Clone)]
pub struct MemoryMedium {
    entries: AHashMap<String, String>,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueMedium for MemoryMedium {
    fn read(&self, key: &str) -> Result<Option<String>, MediumError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), MediumError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Durable medium storing one `<key>.json` file per key inside a directory.
///
/// Keys are percent-encoded into file names, so distinct keys never share a
/// file. The empty key is rejected.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// failed write leaves the previous value intact.
#[derive(Debug, Clone)]
pub struct FileMedium {
    dir: PathBuf,
}

impl FileMedium {
    /// Opens (creating if needed) the directory backing this medium.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, MediumError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|e| {
            MediumError::Unavailable(format!(
                "Could not create directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
        if !dir.is_dir() {
            return Err(MediumError::Unavailable(format!(
                "'{}' is not a directory",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, MediumError> {
        if key.is_empty() {
            return Err(MediumError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", urlencoding::encode(key))))
    }
}

impl KeyValueMedium for FileMedium {
    fn read(&self, key: &str) -> Result<Option<String>, MediumError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MediumError::Read {
                key: key.to_string(),
                message: format!("Could not read '{}': {}", path.display(), e),
            }),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), MediumError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        let write_err = |e: std::io::Error| MediumError::Write {
            key: key.to_string(),
            message: format!("Could not write '{}': {}", path.display(), e),
        };

        let mut file = fs::File::create(&tmp).map_err(write_err)?;
        file.write_all(value.as_bytes()).map_err(write_err)?;
        file.sync_all().map_err(write_err)?;
        fs::rename(&tmp, &path).map_err(write_err)
    }

    fn is_durable(&self) -> bool {
        true
    }
}
