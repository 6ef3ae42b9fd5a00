//! Live-surface edits and the edit reaction pipeline

use crate::commands::Cmd;
use crate::messages::EditMsg;
use crate::model::{AppModel, EditorSession, Mode};
use crate::render::extract;
use crate::selection::{
    delete_backward, delete_forward, insert_text, SelectionOffsets,
};

use super::persist;

/// Handle live-surface editing messages
pub fn update_edit(model: &mut AppModel, msg: EditMsg) -> Option<Cmd> {
    let session = &mut model.session;
    if session.mode != Mode::Edit {
        tracing::debug!("Edit message ignored outside Edit mode");
        return None;
    }

    match msg {
        EditMsg::InsertText(text) => {
            let range = current_range(session);
            let caret = insert_text(&mut session.surface, range, &text);
            after_edit(session, caret)
        }

        EditMsg::DeleteBackward => {
            let range = current_range(session);
            let caret = delete_backward(&mut session.surface, range);
            after_edit(session, caret)
        }

        EditMsg::DeleteForward => {
            let range = current_range(session);
            let caret = delete_forward(&mut session.surface, range);
            after_edit(session, caret)
        }

        EditMsg::SetSelection(selection) => {
            session.selection = Some(selection);
            None
        }

        EditMsg::CompositionStart => {
            session.composition = Some(String::new());
            None
        }

        EditMsg::CompositionUpdate(text) => {
            if session.composition.is_none() {
                return None;
            }
            session.composition = Some(text);
            Some(Cmd::Redraw)
        }

        EditMsg::CompositionEnd(text) => {
            session.composition = None;
            if !text.is_empty() {
                let range = current_range(session);
                let caret = insert_text(&mut session.surface, range, &text);
                session.set_selection_offsets(SelectionOffsets::caret(caret));
            }
            react(session)
        }
    }
}

/// Selection as offsets, or a caret at the end of the surface
fn current_range(session: &EditorSession) -> SelectionOffsets {
    session
        .selection_offsets()
        .unwrap_or_else(|| SelectionOffsets::caret(session.surface.logical_len()))
}

fn after_edit(session: &mut EditorSession, caret: usize) -> Option<Cmd> {
    session.set_selection_offsets(SelectionOffsets::caret(caret));
    if session.is_composing() {
        // Partial characters are not extracted or redacted mid-composition
        return Some(Cmd::Redraw);
    }
    react(session)
}

/// Re-extract, redact and persist the live surface.
///
/// When redaction changes the text the surface is rebuilt from the redacted
/// form and the caret returns to its pre-redaction offset, clamped to the new
/// length.
pub(crate) fn react(session: &mut EditorSession) -> Option<Cmd> {
    let text = extract(&session.surface);
    let redacted = session.redactor.apply(&text);

    if redacted != text {
        let caret = session
            .selection_offsets()
            .map_or(0, |offsets| offsets.start);
        session.raw = redacted;
        session.rerender();
        let len = session.char_count();
        session.set_selection_offsets(SelectionOffsets::caret(caret.min(len)));
    } else {
        session.raw = text;
    }

    Some(Cmd::batch(vec![persist(session), Cmd::Redraw]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotesConfig;
    use crate::messages::{Msg, SessionMsg};
    use crate::update::{loaded_model, update};

    fn editing(text: &str) -> AppModel {
        let mut model = loaded_model("vid", text);
        update(&mut model, Msg::Session(SessionMsg::BeginEdit { pointer: None }));
        model
    }

    #[test]
    fn test_ignored_in_display_mode() {
        let mut model = loaded_model("vid", "ab");
        assert_eq!(update_edit(&mut model, EditMsg::InsertText("x".into())), None);
        assert_eq!(model.session.raw, "ab");
    }

    #[test]
    fn test_insert_persists_extracted_text() {
        let mut model = editing("ab");
        let cmd = update_edit(&mut model, EditMsg::InsertText("x".into())).unwrap();
        assert_eq!(model.session.raw, "xab");
        assert_eq!(
            cmd.flatten(),
            vec![
                Cmd::SaveText {
                    video_id: "vid".into(),
                    text: "xab".into(),
                },
                Cmd::Redraw,
            ]
        );
    }

    #[test]
    fn test_delete_backward_at_start_keeps_text() {
        let mut model = editing("ab");
        update_edit(&mut model, EditMsg::DeleteBackward);
        assert_eq!(model.session.raw, "ab");
        update_edit(&mut model, EditMsg::DeleteForward);
        assert_eq!(model.session.raw, "b");
    }

    #[test]
    fn test_redaction_restores_clamped_caret() {
        let mut model = editing("");
        model.session.set_config(NotesConfig {
            ng_words: vec!["bad".into()],
            ..Default::default()
        });

        update_edit(&mut model, EditMsg::InsertText("so bad!".into()));
        assert_eq!(model.session.raw, "so 〇!");
        // Pre-redaction caret 7 clamped to the new length
        assert_eq!(
            model.session.selection_offsets(),
            Some(SelectionOffsets::caret(5))
        );
    }

    #[test]
    fn test_composition_defers_reaction() {
        let mut model = editing("ab");
        update_edit(&mut model, EditMsg::CompositionStart);
        update_edit(&mut model, EditMsg::CompositionUpdate("か".into()));
        assert_eq!(model.session.composition.as_deref(), Some("か"));

        let cmd = update_edit(&mut model, EditMsg::InsertText("か".into()));
        assert_eq!(cmd, Some(Cmd::Redraw));
        assert_eq!(model.session.raw, "ab");

        let cmd = update_edit(&mut model, EditMsg::CompositionEnd(String::new())).unwrap();
        assert!(!model.session.is_composing());
        assert_eq!(model.session.raw, "かab");
        assert!(cmd.flatten().contains(&Cmd::SaveText {
            video_id: "vid".into(),
            text: "かab".into(),
        }));
    }

    #[test]
    fn test_composition_end_inserts_committed_text() {
        let mut model = editing("");
        update_edit(&mut model, EditMsg::CompositionStart);
        update_edit(&mut model, EditMsg::CompositionEnd("漢字".into()));
        assert_eq!(model.session.raw, "漢字");
        assert_eq!(
            model.session.selection_offsets(),
            Some(SelectionOffsets::caret(2))
        );
    }
}
