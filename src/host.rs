//! Service contracts between the note session and its host environment
//!
//! Storage, the video element, the stamp catalog and the clipboard are
//! external collaborators. The runtime talks to them only through these
//! traits; in-memory implementations back the tests and the CLI.

use std::collections::HashMap;
use std::fmt;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::stamps::StampSource;

/// Storage key for a video's note
pub fn note_key(video_id: &str) -> String {
    format!("video_{}", video_id)
}

/// A persisted note value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNote {
    pub text: String,
    /// Incremented on every write
    #[serde(default)]
    pub revision: u64,
    /// Unix epoch seconds of the last write
    #[serde(default)]
    pub updated_at: u64,
}

impl StoredNote {
    /// The next revision of `previous` with new text
    pub fn next(previous: Option<&StoredNote>, text: &str) -> Self {
        Self {
            text: text.to_string(),
            revision: previous.map_or(1, |p| p.revision + 1),
            updated_at: now_epoch_secs(),
        }
    }
}

pub(crate) fn now_epoch_secs() -> u64 {
    SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// Errors reported by host services
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The service could not be reached or failed to read/write
    Unavailable(String),
    /// Stored data could not be decoded
    Corrupt(String),
    /// The operation is not possible in the current context
    Rejected(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Unavailable(e) => write!(f, "Service unavailable: {}", e),
            HostError::Corrupt(e) => write!(f, "Corrupt data: {}", e),
            HostError::Rejected(e) => write!(f, "Rejected: {}", e),
        }
    }
}

impl std::error::Error for HostError {}

/// Key-value note storage keyed by [`note_key`]
pub trait NoteStore {
    fn get(&self, key: &str) -> Result<Option<StoredNote>, HostError>;
    fn set(&mut self, key: &str, text: &str) -> Result<StoredNote, HostError>;
    /// Returns whether a note was removed
    fn delete(&mut self, key: &str) -> Result<bool, HostError>;
    /// All notes, most recently updated first
    fn list(&self) -> Result<Vec<(String, StoredNote)>, HostError>;
}

/// The page's video element
pub trait VideoSource {
    /// Current playback position, `None` when the page has no video
    fn current_time(&self) -> Option<u64>;
    /// Best-effort seek; live broadcasts may reject it
    fn seek(&mut self, seconds: u64) -> Result<(), HostError>;
    fn is_live(&self) -> bool;
}

/// External stamp catalog
pub trait StampCatalog {
    fn lookup(&self) -> Result<Vec<StampSource>, HostError>;
}

/// System clipboard
pub trait Clipboard {
    fn set_text(&mut self, text: &str) -> Result<(), HostError>;
    fn get_text(&mut self) -> Result<String, HostError>;
}

/// In-memory note store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    notes: HashMap<String, StoredNote>,
    /// When set, every call fails with this message
    pub fail_with: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn check(&self) -> Result<(), HostError> {
        match &self.fail_with {
            Some(e) => Err(HostError::Unavailable(e.clone())),
            None => Ok(()),
        }
    }
}

impl NoteStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<StoredNote>, HostError> {
        self.check()?;
        Ok(self.notes.get(key).cloned())
    }

    fn set(&mut self, key: &str, text: &str) -> Result<StoredNote, HostError> {
        self.check()?;
        let note = StoredNote::next(self.notes.get(key), text);
        self.notes.insert(key.to_string(), note.clone());
        Ok(note)
    }

    fn delete(&mut self, key: &str) -> Result<bool, HostError> {
        self.check()?;
        Ok(self.notes.remove(key).is_some())
    }

    fn list(&self) -> Result<Vec<(String, StoredNote)>, HostError> {
        self.check()?;
        let mut notes: Vec<_> = self
            .notes
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        notes.sort_by(|a, b| {
            b.1.updated_at
                .cmp(&a.1.updated_at)
                .then(b.1.revision.cmp(&a.1.revision))
                .then(a.0.cmp(&b.0))
        });
        Ok(notes)
    }
}

/// A video stopped at a fixed position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedVideo {
    pub time: u64,
    pub live: bool,
    /// Positions passed to `seek`, in order
    pub seeks: Vec<u64>,
}

impl FixedVideo {
    pub fn at(time: u64) -> Self {
        Self {
            time,
            ..Default::default()
        }
    }

    pub fn live_at(time: u64) -> Self {
        Self {
            time,
            live: true,
            ..Default::default()
        }
    }
}

impl VideoSource for FixedVideo {
    fn current_time(&self) -> Option<u64> {
        Some(self.time)
    }

    fn seek(&mut self, seconds: u64) -> Result<(), HostError> {
        if self.live {
            return Err(HostError::Rejected("cannot seek a live broadcast".into()));
        }
        self.seeks.push(seconds);
        self.time = seconds;
        Ok(())
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

/// A page without a video element
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVideo;

impl VideoSource for NoVideo {
    fn current_time(&self) -> Option<u64> {
        None
    }

    fn seek(&mut self, _seconds: u64) -> Result<(), HostError> {
        Err(HostError::Rejected("no video on this page".into()))
    }

    fn is_live(&self) -> bool {
        false
    }
}

/// A catalog holding fixed sources, or a fixed failure
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    pub sources: Vec<StampSource>,
    pub fail_with: Option<String>,
}

impl MemoryCatalog {
    pub fn new(sources: Vec<StampSource>) -> Self {
        Self {
            sources,
            fail_with: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            sources: Vec::new(),
            fail_with: Some(message.into()),
        }
    }
}

impl StampCatalog for MemoryCatalog {
    fn lookup(&self) -> Result<Vec<StampSource>, HostError> {
        match &self.fail_with {
            Some(e) => Err(HostError::Unavailable(e.clone())),
            None => Ok(self.sources.clone()),
        }
    }
}

/// Clipboard that records what was copied
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), HostError> {
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, HostError> {
        self.contents
            .clone()
            .ok_or_else(|| HostError::Unavailable("clipboard is empty".into()))
    }
}

/// The system clipboard
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self, HostError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| HostError::Unavailable(e.to_string()))
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), HostError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| HostError::Unavailable(e.to_string()))
    }

    fn get_text(&mut self) -> Result<String, HostError> {
        self.inner
            .get_text()
            .map_err(|e| HostError::Unavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_key() {
        assert_eq!(note_key("abc123"), "video_abc123");
    }

    #[test]
    fn test_memory_store_revisions() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);

        let first = store.set("k", "one").unwrap();
        let second = store.set("k", "two").unwrap();
        assert_eq!(first.revision, 1);
        assert_eq!(second.revision, 2);
        assert_eq!(store.get("k").unwrap().unwrap().text, "two");

        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
    }

    #[test]
    fn test_memory_store_failure() {
        let store = MemoryStore {
            fail_with: Some("offline".into()),
            ..Default::default()
        };
        assert_eq!(
            store.get("k"),
            Err(HostError::Unavailable("offline".into()))
        );
    }

    #[test]
    fn test_live_video_rejects_seek() {
        let mut video = FixedVideo::live_at(30);
        assert!(video.seek(10).is_err());
        assert_eq!(video.current_time(), Some(30));

        let mut video = FixedVideo::at(30);
        video.seek(10).unwrap();
        assert_eq!(video.seeks, vec![10]);
    }
}
