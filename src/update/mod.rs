//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod edit;
mod overlay;
mod service;
mod session;
mod timestamp;

use tracing::{debug, span, Level};

use crate::commands::Cmd;
use crate::messages::Msg;
use crate::model::{sync_status, AppModel, EditorSession};

pub use edit::update_edit;
pub use overlay::update_overlay;
pub use service::update_service;
pub use session::update_session;
pub use timestamp::update_timestamp;

/// Main update function - dispatches to sub-handlers
pub fn update(model: &mut AppModel, msg: Msg) -> Option<Cmd> {
    let msg_name = msg_type_name(&msg);
    let _span = span!(Level::DEBUG, "update", msg = %msg_name).entered();
    let mode_before = model.session.mode;

    let result = match msg {
        Msg::Session(m) => update_session(model, m),
        Msg::Edit(m) => update_edit(model, m),
        Msg::Timestamp(m) => update_timestamp(model, m),
        Msg::Overlay(m) => update_overlay(model, m),
        Msg::Service(m) => update_service(model, m),
    };

    if model.session.mode != mode_before {
        debug!(target: "mode", from = ?mode_before, to = ?model.session.mode, "mode changed");
    }

    // Sync status line after state changes
    sync_status(&model.session, &mut model.status);

    result
}

/// Get a display name for a message type
///
/// Text payloads are elided so note content stays out of the logs.
fn msg_type_name(msg: &Msg) -> String {
    let full = format!("{:?}", msg);
    match full.find('(') {
        Some(first) => match full[first + 1..].find(['(', '{', ' ']) {
            Some(second) => full[..first + 1 + second].to_string(),
            None => full,
        },
        None => full,
    }
}

/// Persist the session's raw text for the current video
pub(crate) fn persist(session: &EditorSession) -> Cmd {
    match &session.video_id {
        Some(video_id) => Cmd::SaveText {
            video_id: video_id.clone(),
            text: session.raw.clone(),
        },
        None => {
            debug!("No video id, note not persisted");
            Cmd::None
        }
    }
}

/// Navigate to `video_id` and deliver `text` as its stored note
#[cfg(test)]
pub(crate) fn loaded_model(video_id: &str, text: &str) -> AppModel {
    use crate::messages::ServiceMsg;
    use crate::model::{LoadPurpose, LoadTicket};

    let mut model = AppModel::default();
    update(&mut model, Msg::navigate(video_id));
    let ticket = LoadTicket {
        video_id: video_id.to_string(),
        generation: model.session.generation,
        purpose: LoadPurpose::Display,
    };
    update(
        &mut model,
        Msg::Service(ServiceMsg::TextLoaded {
            ticket,
            text: Some(text.to_string()),
        }),
    );
    model
}
