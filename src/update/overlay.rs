//! Stamp picker overlay

use crate::commands::Cmd;
use crate::messages::OverlayMsg;
use crate::model::{AppModel, CatalogState, Mode, StampOverlay};
use crate::render::RenderNode;
use crate::selection::{replace_range, SelectionOffsets};

use super::edit::react;

/// Handle stamp picker messages
pub fn update_overlay(model: &mut AppModel, msg: OverlayMsg) -> Option<Cmd> {
    let session = &mut model.session;

    match msg {
        OverlayMsg::Open => {
            if session.mode != Mode::Edit {
                tracing::debug!("Stamp picker only opens in Edit mode");
                return None;
            }
            // Capture the selection before the overlay takes focus
            let saved = session
                .selection_offsets()
                .unwrap_or_else(|| SelectionOffsets::caret(session.surface.logical_len()));
            session.overlay = Some(StampOverlay {
                saved,
                catalog: CatalogState::Loading,
            });
            Some(Cmd::batch(vec![Cmd::LoadCatalog, Cmd::Redraw]))
        }

        OverlayMsg::Pick(name) => {
            let overlay = session.overlay.as_ref()?;
            if !matches!(overlay.catalog, CatalogState::Loaded(_)) {
                tracing::debug!("Stamp pick ignored: catalog not loaded");
                return None;
            }
            let saved = overlay.saved;
            session.overlay = None;

            let node = match session.stamps.url(&name) {
                Some(url) => RenderNode::stamp(name, url),
                None => {
                    tracing::warn!("Unknown stamp {:?}, inserting as text", name);
                    RenderNode::text(name)
                }
            };

            session.set_selection_offsets(saved);
            let range = session.selection_offsets().unwrap_or(saved);
            let caret = replace_range(&mut session.surface, range, vec![node]);
            session.set_selection_offsets(SelectionOffsets::caret(caret));
            react(session)
        }

        OverlayMsg::Close => {
            session.overlay.take()?;
            Some(Cmd::Redraw)
        }
    }
}
