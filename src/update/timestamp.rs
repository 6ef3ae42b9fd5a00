//! Timestamp insertion, selection, adjustment and clipboard actions

use crate::commands::Cmd;
use crate::messages::TimestampMsg;
use crate::model::{AppModel, LoadPurpose, LoadTicket, Mode, Scroll};
use crate::render::{extract, RenderNode};
use crate::timecode;

use super::persist;

/// Feedback shown after copying the whole note
pub const COPIED_MESSAGE: &str = "コピーしました！";

/// Handle timestamp messages
pub fn update_timestamp(model: &mut AppModel, msg: TimestampMsg) -> Option<Cmd> {
    let session = &mut model.session;

    match msg {
        TimestampMsg::Add { seconds } => {
            let Some(video_id) = session.video_id.clone() else {
                tracing::debug!("Timestamp ignored: page has no video id");
                return None;
            };
            let stamp = session.config.decorate(&timecode::format(seconds, false));

            if session.mode == Mode::Edit {
                let text = session
                    .redactor
                    .apply(&format!("{}{}", extract(&session.surface), stamp));
                let end = text.chars().count();
                session.enter_edit(text, Some(end));
                session.scroll = Scroll::Bottom;
                return Some(Cmd::batch(vec![persist(session), Cmd::Redraw]));
            }

            Some(Cmd::LoadText {
                ticket: LoadTicket {
                    video_id,
                    generation: session.generation,
                    purpose: LoadPurpose::AppendTimestamp(stamp),
                },
            })
        }

        TimestampMsg::Click { path } => {
            if session.mode != Mode::Display {
                return None;
            }
            let seconds = match session.surface.get(&path) {
                Some(RenderNode::TimestampToken(text)) => timecode::parse(text),
                _ => return None,
            };
            session.selected_token = Some(path);
            Some(Cmd::batch(vec![Cmd::Seek(seconds), Cmd::Redraw]))
        }

        TimestampMsg::Adjust(delta) => {
            if session.mode != Mode::Display {
                return None;
            }
            let path = session.selected_token.clone()?;
            let Some(RenderNode::TimestampToken(text)) = session.surface.get_mut(&path) else {
                session.selected_token = None;
                return None;
            };
            *text = timecode::shift(text, delta);
            session.raw = extract(&session.surface);
            Some(Cmd::batch(vec![persist(session), Cmd::Redraw]))
        }

        TimestampMsg::CopyCurrent { seconds } => {
            let time = timecode::format(seconds, false);
            session.clip_time = Some(time.clone());
            Some(Cmd::CopyToClipboard(time))
        }

        TimestampMsg::PasteClip => {
            let Some(clip) = session.clip_time.clone() else {
                tracing::debug!("Paste ignored: no copied time");
                return None;
            };
            let Some(video_id) = session.video_id.clone() else {
                tracing::debug!("Paste ignored: page has no video id");
                return None;
            };
            Some(Cmd::LoadText {
                ticket: LoadTicket {
                    video_id,
                    generation: session.generation,
                    purpose: LoadPurpose::AppendClip(session.config.decorate(&clip)),
                },
            })
        }

        TimestampMsg::CopyAll => {
            let text = match session.mode {
                Mode::Edit => extract(&session.surface),
                Mode::Display => session.raw.clone(),
            };
            model.status.flash(COPIED_MESSAGE);
            Some(Cmd::CopyToClipboard(text))
        }
    }
}
