//! Runtime - executes commands against host services
//!
//! The update functions never touch storage, the video or the clipboard
//! directly. They return [`Cmd`]s; `App` runs them against the host traits and
//! feeds results back as [`Msg`]s through a channel, the way an event loop
//! delivers completions from background work.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, Sender};

use crate::commands::Cmd;
use crate::config::NotesConfig;
use crate::host::{note_key, Clipboard, NoteStore, StampCatalog, VideoSource};
use crate::keymap::{Action, KeyCode, Keymap, Shortcut};
use crate::messages::{Msg, ServiceMsg, SessionMsg, TimestampMsg};
use crate::model::{AppModel, Mode};
use crate::update::update;

/// Host services used by the runtime
pub struct Services {
    pub store: Box<dyn NoteStore>,
    pub video: Box<dyn VideoSource>,
    pub catalog: Box<dyn StampCatalog>,
    pub clipboard: Box<dyn Clipboard>,
}

/// A running note session
pub struct App {
    pub model: AppModel,
    pub keymap: Keymap,
    services: Services,
    msg_tx: Sender<Msg>,
    msg_rx: Receiver<Msg>,
    /// Where `PersistVisibility` writes the settings; not persisted when `None`
    config_path: Option<PathBuf>,
    redraws: usize,
}

impl App {
    pub fn new(config: NotesConfig, keymap: Keymap, services: Services) -> Self {
        let (msg_tx, msg_rx) = mpsc::channel();
        Self {
            model: AppModel::new(config),
            keymap,
            services,
            msg_tx,
            msg_rx,
            config_path: None,
            redraws: 0,
        }
    }

    /// Persist settings changes (panel visibility) to `path`
    pub fn with_config_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config_path = Some(path.into());
        self
    }

    pub fn services(&self) -> &Services {
        &self.services
    }

    pub fn services_mut(&mut self) -> &mut Services {
        &mut self.services
    }

    /// Number of redraws requested so far
    pub fn redraws(&self) -> usize {
        self.redraws
    }

    /// Run one message through `update` and execute the resulting command.
    ///
    /// Service results are queued, not applied; call [`App::pump`] to deliver them.
    pub fn dispatch(&mut self, msg: Msg) {
        if let Some(cmd) = update(&mut self.model, msg) {
            self.process_cmd(cmd);
        }
    }

    /// Deliver queued service results until the queue is empty.
    ///
    /// Returns the number of messages processed.
    pub fn pump(&mut self) -> usize {
        let mut count = 0;
        while let Ok(msg) = self.msg_rx.try_recv() {
            self.dispatch(msg);
            count += 1;
        }
        count
    }

    /// Dispatch and pump until settled
    pub fn run(&mut self, msg: Msg) {
        self.dispatch(msg);
        self.pump();
    }

    /// Route a key chord from the host page.
    ///
    /// Returns whether the key was consumed.
    pub fn handle_key(&mut self, shortcut: &Shortcut) -> bool {
        let Some(seconds) = self.services.video.current_time() else {
            tracing::debug!("Shortcut ignored: no video on the page");
            return false;
        };

        let session = &self.model.session;
        if session.mode == Mode::Display
            && session.selected_token.is_some()
            && !shortcut.has_modifiers()
        {
            let delta = match shortcut.key {
                KeyCode::ArrowUp => Some(1),
                KeyCode::ArrowDown => Some(-1),
                _ => None,
            };
            if let Some(delta) = delta {
                self.run(Msg::Timestamp(TimestampMsg::Adjust(delta)));
                return true;
            }
        }

        let Some(action) = self.keymap.lookup(shortcut) else {
            return false;
        };
        if self.model.session.mode == Mode::Edit && action != Action::AddTimestamp {
            tracing::debug!(action = %action, "Shortcut ignored while editing");
            return false;
        }

        tracing::debug!(action = %action, shortcut = %shortcut.display_string(), "Shortcut");
        let msg = match action {
            Action::AddTimestamp | Action::AddTimestampAlt => {
                Msg::Timestamp(TimestampMsg::Add { seconds })
            }
            Action::ToggleVisibility => Msg::Session(SessionMsg::ToggleVisibility),
            Action::CopyTimestamp => Msg::Timestamp(TimestampMsg::CopyCurrent { seconds }),
            Action::PasteTimestamp => Msg::Timestamp(TimestampMsg::PasteClip),
        };
        self.run(msg);
        true
    }

    fn send(&self, msg: Msg) {
        // The receiver lives in `self`, so sending cannot fail while we exist
        let _ = self.msg_tx.send(msg);
    }

    fn process_cmd(&mut self, cmd: Cmd) {
        match cmd {
            Cmd::None => {}
            Cmd::Redraw => self.redraws += 1,
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.process_cmd(cmd);
                }
            }

            Cmd::LoadText { ticket } => {
                let text = match self.services.store.get(&note_key(&ticket.video_id)) {
                    Ok(note) => note.map(|n| n.text),
                    Err(e) => {
                        tracing::warn!("Failed to load note for {}: {}", ticket.video_id, e);
                        None
                    }
                };
                self.send(Msg::Service(ServiceMsg::TextLoaded { ticket, text }));
            }

            Cmd::SaveText { video_id, text } => {
                match self.services.store.set(&note_key(&video_id), &text) {
                    Ok(note) => tracing::debug!(
                        video_id = %video_id,
                        revision = note.revision,
                        "Saved note"
                    ),
                    Err(e) => tracing::warn!("Failed to save note for {}: {}", video_id, e),
                }
            }

            Cmd::Seek(seconds) => {
                if self.services.video.is_live() {
                    tracing::debug!("Seek skipped: live broadcast");
                    return;
                }
                if let Err(e) = self.services.video.seek(seconds) {
                    tracing::debug!("Seek to {} failed: {}", seconds, e);
                }
            }

            Cmd::CopyToClipboard(text) => {
                if let Err(e) = self.services.clipboard.set_text(&text) {
                    tracing::warn!("Failed to copy to clipboard: {}", e);
                }
            }

            Cmd::LoadCatalog => {
                let result = self
                    .services
                    .catalog
                    .lookup()
                    .map_err(|e| e.to_string());
                self.send(Msg::Service(ServiceMsg::CatalogLoaded(result)));
            }

            Cmd::PersistVisibility(hidden) => {
                let Some(path) = &self.config_path else {
                    tracing::debug!(hidden, "Visibility not persisted: no config path");
                    return;
                };
                if let Err(e) = self.model.session.config.save_to(path) {
                    tracing::warn!("{}", e);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FixedVideo, MemoryCatalog, MemoryClipboard, MemoryStore, NoVideo};
    use crate::keymap::default_bindings;

    fn app(video: Box<dyn VideoSource>) -> App {
        App::new(
            NotesConfig::default(),
            Keymap::with_bindings(default_bindings()),
            Services {
                store: Box::new(MemoryStore::new()),
                video,
                catalog: Box::new(MemoryCatalog::new(Vec::new())),
                clipboard: Box::new(MemoryClipboard::default()),
            },
        )
    }

    #[test]
    fn test_load_result_arrives_through_pump() {
        let mut app = app(Box::new(FixedVideo::at(10)));
        app.dispatch(Msg::navigate("v1"));
        assert_eq!(app.model.session.generation, 1);
        // Note text and stamp catalog
        assert_eq!(app.pump(), 2);
        assert_eq!(app.pump(), 0);
    }

    #[test]
    fn test_no_video_skips_shortcuts() {
        let mut app = app(Box::new(NoVideo));
        app.run(Msg::navigate("v1"));
        assert!(!app.handle_key(&Shortcut::char('p')));
        assert_eq!(app.model.session.raw, "");
    }

    #[test]
    fn test_unbound_key_is_not_consumed() {
        let mut app = app(Box::new(FixedVideo::at(10)));
        app.run(Msg::navigate("v1"));
        assert!(!app.handle_key(&Shortcut::char('z')));
    }
}
