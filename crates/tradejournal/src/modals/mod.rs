mod celebration;
mod entry_form;
pub mod helpers;

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};
use tradejournal_core::EntryDraft;

use crate::state::{AppState, ModalState};

pub use celebration::render_celebration_modal;
pub use entry_form::render_entry_form_modal;

/// Result of handling a modal key event
#[derive(Debug, PartialEq)]
pub enum ModalResult {
    /// The entry form produced a valid draft
    Submitted(EntryDraft),
    /// Modal was closed without a result
    Cancelled,
    /// Key was handled, modal still active
    Continue,
}

/// Render the active modal as an overlay
pub fn render_modal(frame: &mut Frame, state: &AppState) {
    match &state.modal {
        ModalState::None => {}
        ModalState::EntryForm(modal) => render_entry_form_modal(frame, modal),
        ModalState::Celebration(modal) => render_celebration_modal(frame, modal),
    }
}

/// Handle key events for the active modal
pub fn handle_modal_key(key: KeyEvent, state: &mut AppState) -> ModalResult {
    match &mut state.modal {
        ModalState::None => ModalResult::Continue,
        ModalState::EntryForm(modal) => entry_form::handle_entry_form_key(key, modal),
        ModalState::Celebration(_) => celebration::handle_celebration_key(key),
    }
}

/// Create a centered rectangle within the given area
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
