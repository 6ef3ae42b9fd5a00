//! Session lifecycle: navigation, mode switches, visibility, clearing

use crate::commands::Cmd;
use crate::messages::SessionMsg;
use crate::model::{AppModel, LoadPurpose, LoadTicket, Mode, Scroll};
use crate::render::extract;
use crate::selection::{save, LiveSelection};

use super::persist;

/// Handle session messages
pub fn update_session(model: &mut AppModel, msg: SessionMsg) -> Option<Cmd> {
    let session = &mut model.session;

    match msg {
        SessionMsg::Navigate { video_id } => {
            if video_id.is_some() && video_id == session.video_id {
                return None;
            }

            session.generation += 1;
            session.video_id = video_id;
            session.overlay = None;
            session.scroll = Scroll::Top;
            session.enter_display(String::new());

            match &session.video_id {
                Some(video_id) => {
                    tracing::debug!(
                        video_id = %video_id,
                        generation = session.generation,
                        "Loading note"
                    );
                    Some(Cmd::batch(vec![
                        Cmd::LoadText {
                            ticket: LoadTicket {
                                video_id: video_id.clone(),
                                generation: session.generation,
                                purpose: LoadPurpose::Display,
                            },
                        },
                        Cmd::LoadCatalog,
                        Cmd::Redraw,
                    ]))
                }
                None => {
                    tracing::debug!("Page has no video id");
                    Some(Cmd::Redraw)
                }
            }
        }

        SessionMsg::BeginEdit { pointer } => {
            if session.mode == Mode::Edit {
                return None;
            }
            let caret = pointer
                .map(|boundary| save(&session.surface, &LiveSelection::collapsed(boundary)).start);
            let text = session.raw.clone();
            session.enter_edit(text, caret);
            Some(Cmd::Redraw)
        }

        SessionMsg::Blur => {
            if session.mode != Mode::Edit {
                return None;
            }
            if session.overlay.is_some() {
                tracing::debug!("Blur ignored while stamp picker is open");
                return None;
            }

            let text = session.redactor.apply(&extract(&session.surface));
            session.enter_display(text);
            Some(Cmd::batch(vec![persist(session), Cmd::Redraw]))
        }

        SessionMsg::Scrolled(offset) => {
            session.scroll = Scroll::Offset(offset);
            None
        }

        SessionMsg::ToggleVisibility => {
            session.hidden = !session.hidden;
            session.config.container_hidden = session.hidden;
            Some(Cmd::batch(vec![
                Cmd::PersistVisibility(session.hidden),
                Cmd::Redraw,
            ]))
        }

        SessionMsg::ClearText => {
            if session.video_id.is_none() {
                tracing::debug!("Clear ignored: page has no video id");
                return None;
            }
            match session.mode {
                Mode::Edit => session.enter_edit(String::new(), None),
                Mode::Display => session.enter_display(String::new()),
            }
            Some(Cmd::batch(vec![persist(session), Cmd::Redraw]))
        }

        SessionMsg::ConfigChanged(config) => {
            session.set_config(config);
            Some(Cmd::Redraw)
        }
    }
}
