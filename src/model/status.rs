//! Status line below the note: character count, banned-timestamp warning,
//! transient feedback messages

use std::time::{Duration, Instant};

use super::session::{EditorSession, Mode};
use crate::shadowban::is_banned;

/// Warning shown when a rendered timestamp matches a shadow-ban pattern
pub const BANNED_WARNING: &str =
    "警告: シャドウバンの可能性があるタイムスタンプが含まれています。";

/// Default lifetime of a transient message
pub const TRANSIENT_DURATION: Duration = Duration::from_millis(1500);

/// A temporary status message that auto-expires
#[derive(Debug, Clone)]
pub struct TransientMessage {
    /// The message text
    pub text: String,
    /// When this message expires
    pub expires_at: Instant,
}

impl TransientMessage {
    /// Create a new transient message with the given duration
    pub fn new(text: impl Into<String>, duration: Duration) -> Self {
        Self {
            text: text.into(),
            expires_at: Instant::now() + duration,
        }
    }

    /// Check if this message has expired
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// Status line state
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub char_count: usize,
    /// Set while the displayed note contains a banned timestamp
    pub warning: Option<&'static str>,
    pub message: Option<TransientMessage>,
}

impl StatusLine {
    /// `現在の文字数: N`
    pub fn char_count_text(&self) -> String {
        format!("現在の文字数: {}", self.char_count)
    }

    /// Show a transient message
    pub fn flash(&mut self, text: impl Into<String>) {
        self.message = Some(TransientMessage::new(text, TRANSIENT_DURATION));
    }

    /// Current message, if it has not expired
    pub fn active_message(&self) -> Option<&str> {
        self.message
            .as_ref()
            .filter(|m| !m.is_expired())
            .map(|m| m.text.as_str())
    }
}

/// Whether any timestamp token in the surface is banned
pub fn has_banned(session: &EditorSession) -> bool {
    session
        .surface
        .timestamps()
        .iter()
        .any(|(_, text)| is_banned(text))
}

/// Refresh the status line after a state change.
///
/// The warning is only recomputed in Display mode; while editing it keeps
/// its last value.
pub fn sync_status(session: &EditorSession, status: &mut StatusLine) {
    status.char_count = session.char_count();
    if session.mode == Mode::Display {
        status.warning = has_banned(session).then_some(BANNED_WARNING);
    }
    if status.message.as_ref().is_some_and(TransientMessage::is_expired) {
        status.message = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_text() {
        let mut session = EditorSession::default();
        session.enter_display("ネタ 1:05".to_string());
        let mut status = StatusLine::default();
        sync_status(&session, &mut status);
        assert_eq!(status.char_count_text(), "現在の文字数: 7");
        assert_eq!(status.warning, None);
    }

    #[test]
    fn test_warning_in_display_mode_only() {
        let mut session = EditorSession::default();
        let mut status = StatusLine::default();

        session.enter_display("see 1:10:05".to_string());
        sync_status(&session, &mut status);
        assert_eq!(status.warning, Some(BANNED_WARNING));

        // Editing keeps the last warning state
        session.enter_edit("clean".to_string(), None);
        sync_status(&session, &mut status);
        assert_eq!(status.warning, Some(BANNED_WARNING));

        session.enter_display("clean".to_string());
        sync_status(&session, &mut status);
        assert_eq!(status.warning, None);
    }

    #[test]
    fn test_flash_message() {
        let mut status = StatusLine::default();
        status.flash("コピーしました！");
        assert_eq!(status.active_message(), Some("コピーしました！"));
    }
}
