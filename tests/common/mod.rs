//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use stampnote::config::NotesConfig;
use stampnote::host::{
    note_key, FixedVideo, MemoryCatalog, MemoryClipboard, MemoryStore, NoteStore, StampCatalog,
    VideoSource,
};
use stampnote::keymap::{default_bindings, Keymap, Shortcut};
use stampnote::runtime::{App, Services};
use stampnote::stamps::{StampEntry, StampSource};
use stampnote::Msg;

/// A catalog with one source holding the `Sparkle` stamp
pub fn sparkle_catalog() -> MemoryCatalog {
    MemoryCatalog::new(vec![StampSource {
        source_id: "UC123".into(),
        source_name: "Channel".into(),
        entries: vec![StampEntry::new("Sparkle", "https://img.example/sparkle.png")],
    }])
}

/// Builder for an `App` over in-memory services
pub struct TestApp {
    config: NotesConfig,
    store: MemoryStore,
    video: Box<dyn VideoSource>,
    catalog: Box<dyn StampCatalog>,
}

impl TestApp {
    pub fn new() -> Self {
        Self {
            config: NotesConfig::default(),
            store: MemoryStore::new(),
            video: Box::new(FixedVideo::at(0)),
            catalog: Box::new(sparkle_catalog()),
        }
    }

    pub fn config(mut self, config: NotesConfig) -> Self {
        self.config = config;
        self
    }

    /// Pre-populate the stored note for `video_id`
    pub fn note(mut self, video_id: &str, text: &str) -> Self {
        self.store.set(&note_key(video_id), text).unwrap();
        self
    }

    pub fn store(mut self, store: MemoryStore) -> Self {
        self.store = store;
        self
    }

    pub fn video(mut self, video: impl VideoSource + 'static) -> Self {
        self.video = Box::new(video);
        self
    }

    pub fn catalog(mut self, catalog: impl StampCatalog + 'static) -> Self {
        self.catalog = Box::new(catalog);
        self
    }

    pub fn build(self) -> App {
        App::new(
            self.config,
            Keymap::with_bindings(default_bindings()),
            Services {
                store: Box::new(self.store),
                video: self.video,
                catalog: self.catalog,
                clipboard: Box::new(MemoryClipboard::default()),
            },
        )
    }

    /// Build and navigate to `video_id`, delivering the stored note
    pub fn open(self, video_id: &str) -> App {
        let mut app = self.build();
        app.run(Msg::navigate(video_id));
        app
    }
}

/// Stored text of a note, if any
pub fn stored(app: &App, video_id: &str) -> Option<String> {
    app.services()
        .store
        .get(&note_key(video_id))
        .unwrap()
        .map(|note| note.text)
}

pub fn key(name: &str) -> Shortcut {
    Shortcut::from_event(name, false, false, false).unwrap()
}
