//! File-backed note store and stamp catalog
//!
//! Notes are kept in MRU (most recently updated) order with a capacity limit
//! and written through to a JSON file on every change.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::host::{now_epoch_secs, HostError, NoteStore, StampCatalog, StoredNote};
use crate::stamps::{dedupe_sources, StampSource};

/// Maximum number of notes to keep
pub const MAX_NOTES: usize = 512;

/// A single note in the store file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub key: String,
    #[serde(flatten)]
    pub note: StoredNote,
}

impl NoteEntry {
    /// Human-readable time since the last write
    pub fn time_ago(&self) -> String {
        time_ago(self.note.updated_at, now_epoch_secs())
    }
}

fn time_ago(then: u64, now: u64) -> String {
    let diff = now.saturating_sub(then);

    if diff < 60 {
        "just now".to_string()
    } else if diff < 3600 {
        let mins = diff / 60;
        format!("{} min{} ago", mins, if mins == 1 { "" } else { "s" })
    } else if diff < 86400 {
        let hours = diff / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else if diff < 604800 {
        let days = diff / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    } else {
        let weeks = diff / 604800;
        format!("{} week{} ago", weeks, if weeks == 1 { "" } else { "s" })
    }
}

/// On-disk layout of the notes file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct NotesFile {
    /// Schema version for forward compatibility
    #[serde(default)]
    version: u32,
    /// Notes, most recently updated first
    #[serde(default)]
    notes: Vec<NoteEntry>,
}

impl NotesFile {
    const CURRENT_VERSION: u32 = 1;
}

/// Persistent note store backed by a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: Vec<NoteEntry>,
    capacity: usize,
}

impl JsonFileStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, HostError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => {
                let file: NotesFile = serde_json::from_str(&contents)
                    .map_err(|e| HostError::Corrupt(format!("{}: {}", path.display(), e)))?;
                file.notes
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(HostError::Unavailable(format!("{}: {}", path.display(), e))),
        };
        tracing::debug!("Opened note store {} ({} notes)", path.display(), entries.len());

        Ok(Self {
            path,
            entries,
            capacity: MAX_NOTES,
        })
    }

    /// Change the capacity limit, evicting the oldest notes beyond it
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity.max(1);
        self.entries.truncate(self.capacity);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Notes in MRU order
    pub fn entries(&self) -> &[NoteEntry] {
        &self.entries
    }

    fn find_index(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.key == key)
    }

    fn save(&self) -> Result<(), HostError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| HostError::Unavailable(format!("{}: {}", parent.display(), e)))?;
        }
        let file = NotesFile {
            version: NotesFile::CURRENT_VERSION,
            notes: self.entries.clone(),
        };
        let contents = serde_json::to_string_pretty(&file)
            .map_err(|e| HostError::Corrupt(e.to_string()))?;
        std::fs::write(&self.path, contents)
            .map_err(|e| HostError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }
}

impl NoteStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<StoredNote>, HostError> {
        Ok(self.find_index(key).map(|idx| self.entries[idx].note.clone()))
    }

    fn set(&mut self, key: &str, text: &str) -> Result<StoredNote, HostError> {
        let previous = self
            .find_index(key)
            .map(|idx| self.entries.remove(idx).note);
        let note = StoredNote::next(previous.as_ref(), text);

        self.entries.insert(
            0,
            NoteEntry {
                key: key.to_string(),
                note: note.clone(),
            },
        );

        // Enforce capacity limit
        if self.entries.len() > self.capacity {
            let evicted = self.entries.len() - self.capacity;
            self.entries.truncate(self.capacity);
            tracing::debug!("Evicted {} oldest notes", evicted);
        }

        self.save()?;
        Ok(note)
    }

    fn delete(&mut self, key: &str) -> Result<bool, HostError> {
        let Some(idx) = self.find_index(key) else {
            return Ok(false);
        };
        self.entries.remove(idx);
        self.save()?;
        Ok(true)
    }

    fn list(&self) -> Result<Vec<(String, StoredNote)>, HostError> {
        Ok(self
            .entries
            .iter()
            .map(|e| (e.key.clone(), e.note.clone()))
            .collect())
    }
}

/// Stamp catalog read from a JSON file holding a list of sources
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl StampCatalog for JsonFileCatalog {
    fn lookup(&self) -> Result<Vec<StampSource>, HostError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("No stamp catalog at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => {
                return Err(HostError::Unavailable(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        let sources: Vec<StampSource> = serde_json::from_str(&contents)
            .map_err(|e| HostError::Corrupt(format!("{}: {}", self.path.display(), e)))?;
        Ok(dedupe_sources(sources))
    }
}
