//! Results from host services: note loads and the stamp catalog

use crate::commands::Cmd;
use crate::messages::ServiceMsg;
use crate::model::{AppModel, CatalogState, LoadPurpose, Mode, Scroll};
use crate::stamps::dedupe_sources;

use super::persist;

/// Handle service results
pub fn update_service(model: &mut AppModel, msg: ServiceMsg) -> Option<Cmd> {
    let session = &mut model.session;

    match msg {
        ServiceMsg::TextLoaded { ticket, text } => {
            if session.video_id.as_deref() != Some(ticket.video_id.as_str())
                || session.generation != ticket.generation
            {
                tracing::debug!(
                    video_id = %ticket.video_id,
                    generation = ticket.generation,
                    current = session.generation,
                    "Discarding stale note load"
                );
                return None;
            }

            let stored = text.unwrap_or_default();
            match ticket.purpose {
                LoadPurpose::Display => {
                    let materialize = stored.is_empty();
                    match session.mode {
                        Mode::Edit => {
                            let end = stored.chars().count();
                            session.enter_edit(stored, Some(end));
                        }
                        Mode::Display => session.enter_display(stored),
                    }
                    if materialize {
                        return Some(Cmd::batch(vec![persist(session), Cmd::Redraw]));
                    }
                    Some(Cmd::Redraw)
                }

                LoadPurpose::AppendTimestamp(stamp) => {
                    let base = if stored.trim().is_empty() {
                        format!("{}\n\n", session.config.default_text)
                    } else {
                        stored
                    };
                    let text = session.redactor.apply(&format!("{}{}", base, stamp));
                    append_and_edit(model, text)
                }

                LoadPurpose::AppendClip(stamp) => {
                    let text = session.redactor.apply(&format!("{}{}", stored, stamp));
                    append_and_edit(model, text)
                }
            }
        }

        ServiceMsg::CatalogLoaded(Ok(sources)) => {
            let sources = dedupe_sources(sources);
            session.set_stamps(&sources);
            if let Some(overlay) = session.overlay.as_mut() {
                overlay.catalog = CatalogState::Loaded(sources);
            }
            Some(Cmd::Redraw)
        }

        ServiceMsg::CatalogLoaded(Err(e)) => {
            tracing::warn!("Stamp catalog unavailable: {}", e);
            if let Some(overlay) = session.overlay.as_mut() {
                overlay.catalog = CatalogState::Failed(e);
            }
            Some(Cmd::Redraw)
        }
    }
}

/// Persist `text` and enter Edit mode with the caret at the end
fn append_and_edit(model: &mut AppModel, text: String) -> Option<Cmd> {
    let session = &mut model.session;
    let end = text.chars().count();
    session.enter_edit(text, Some(end));
    session.scroll = Scroll::Bottom;
    Some(Cmd::batch(vec![persist(session), Cmd::Redraw]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{Msg, SessionMsg};
    use crate::model::LoadTicket;
    use crate::stamps::{StampEntry, StampSource};
    use crate::update::{loaded_model, update};

    fn loaded(ticket: LoadTicket, text: Option<&str>) -> ServiceMsg {
        ServiceMsg::TextLoaded {
            ticket,
            text: text.map(str::to_string),
        }
    }

    fn ticket(model: &AppModel, purpose: LoadPurpose) -> LoadTicket {
        LoadTicket {
            video_id: model.session.video_id.clone().unwrap_or_default(),
            generation: model.session.generation,
            purpose,
        }
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut model = AppModel::default();
        update(&mut model, Msg::navigate("a"));
        let stale = ticket(&model, LoadPurpose::Display);
        update(&mut model, Msg::navigate("b"));

        assert_eq!(update_service(&mut model, loaded(stale, Some("for a"))), None);
        assert_eq!(model.session.raw, "");
        assert_eq!(model.session.video_id.as_deref(), Some("b"));
    }

    #[test]
    fn test_empty_note_is_materialized() {
        let mut model = AppModel::default();
        update(&mut model, Msg::navigate("a"));
        let t = ticket(&model, LoadPurpose::Display);
        let cmd = update_service(&mut model, loaded(t, None)).unwrap();
        assert!(cmd.flatten().contains(&Cmd::SaveText {
            video_id: "a".into(),
            text: String::new(),
        }));
    }

    #[test]
    fn test_stored_note_is_displayed() {
        let model = loaded_model("a", "intro 1:05");
        assert_eq!(model.session.mode, Mode::Display);
        assert_eq!(model.session.surface.timestamps().len(), 1);
        assert_eq!(model.status.char_count, 10);
    }

    #[test]
    fn test_first_timestamp_seeds_default_text() {
        let mut model = loaded_model("a", "  ");
        let t = ticket(&model, LoadPurpose::AppendTimestamp(" - 1:05  ".into()));
        update_service(&mut model, loaded(t, Some("  ")));

        let expected = format!("{}\n\n - 1:05  ", model.session.config.default_text);
        assert_eq!(model.session.raw, expected);
        assert_eq!(model.session.mode, Mode::Edit);
        assert_eq!(model.session.scroll, Scroll::Bottom);
    }

    #[test]
    fn test_append_timestamp_redacts() {
        let mut model = loaded_model("a", "ネタバレ");
        update(
            &mut model,
            Msg::Session(SessionMsg::ConfigChanged(crate::config::NotesConfig {
                ng_words: vec!["ネタバレ".into()],
                ..Default::default()
            })),
        );
        let t = ticket(&model, LoadPurpose::AppendTimestamp(" - 0:30  ".into()));
        update_service(&mut model, loaded(t, Some("ネタバレ")));
        assert_eq!(model.session.raw, "〇 - 0:30  ");
    }

    #[test]
    fn test_append_clip_keeps_empty_note_empty() {
        let mut model = loaded_model("a", "");
        let t = ticket(&model, LoadPurpose::AppendClip(" - 0:07  ".into()));
        update_service(&mut model, loaded(t, None));
        assert_eq!(model.session.raw, " - 0:07  ");
    }

    #[test]
    fn test_catalog_updates_stamp_map() {
        let mut model = loaded_model("a", "hi Sparkle");
        let source = StampSource {
            source_id: "c".into(),
            source_name: "C".into(),
            entries: vec![StampEntry::new("Sparkle", "u")],
        };
        update_service(
            &mut model,
            ServiceMsg::CatalogLoaded(Ok(vec![source.clone(), source])),
        );
        assert!(model.session.stamps.contains("Sparkle"));
        assert_eq!(
            model.session.surface.children().map(<[_]>::len),
            Some(2)
        );
    }
}
