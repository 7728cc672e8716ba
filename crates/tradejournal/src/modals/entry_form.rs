use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::Constraint,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use tradejournal_core::DraftKind;

use super::ModalResult;
use super::helpers::{HelpText, render_cursor_line, render_modal_frame, tail_fit};
use crate::state::{EntryFormModal, FormField};
use crate::util::styles::{FOCUS_COLOR, HELP_COLOR, NEGATIVE_COLOR, PAYOUT_COLOR, POSITIVE_COLOR};

const FIELDS: [FormField; 4] = [
    FormField::Date,
    FormField::Amount,
    FormField::Setup,
    FormField::Notes,
];

pub fn render_entry_form_modal(frame: &mut Frame, modal: &EntryFormModal) {
    let (title, color) = match modal.kind {
        DraftKind::Trade => ("Log Trading Day", POSITIVE_COLOR),
        DraftKind::Payout => ("Log Payout", PAYOUT_COLOR),
    };

    let mf = render_modal_frame(
        frame,
        title,
        60,
        15,
        color,
        &[
            Constraint::Length(2), // Kind tabs
            Constraint::Length(2), // Date
            Constraint::Length(2), // Amount
            Constraint::Length(2), // Setup
            Constraint::Length(2), // Notes
            Constraint::Length(1), // Error
            Constraint::Length(1), // Help
        ],
    );

    let tab = |kind: DraftKind| {
        let style = if modal.kind == kind {
            Style::default()
                .fg(Color::Black)
                .bg(color)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(HELP_COLOR)
        };
        Span::styled(format!(" {} ", kind.label()), style)
    };
    let tabs = Line::from(vec![
        tab(DraftKind::Trade),
        Span::raw(" "),
        tab(DraftKind::Payout),
    ]);
    frame.render_widget(Paragraph::new(tabs), mf.chunks[0]);

    let width = mf.inner.width as usize;
    for (i, field) in FIELDS.iter().enumerate() {
        let focused = modal.focused == *field;
        let label_style = if focused {
            Style::default().fg(FOCUS_COLOR).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(HELP_COLOR)
        };

        let value = tail_fit(modal.field_value(*field), width);
        let value_line = if focused {
            render_cursor_line(value, " ")
        } else {
            Line::from(format!(" {}", value))
        };

        let lines = vec![
            Line::from(Span::styled(field.label(modal.kind), label_style)),
            value_line,
        ];
        frame.render_widget(Paragraph::new(lines), mf.chunks[i + 1]);
    }

    if let Some(error) = &modal.error {
        let error_line = Paragraph::new(Line::from(Span::styled(
            error.clone(),
            Style::default().fg(NEGATIVE_COLOR),
        )));
        frame.render_widget(error_line, mf.chunks[5]);
    }

    let help = HelpText::new()
        .key("[Enter]", Color::Green, "Save")
        .key("[Tab]", Color::Cyan, "Field")
        .key("[Ctrl+T]", Color::Magenta, "Trade/Payout")
        .key("[Esc]", Color::Yellow, "Cancel")
        .build_centered();
    frame.render_widget(help, mf.chunks[6]);
}

pub fn handle_entry_form_key(key: KeyEvent, modal: &mut EntryFormModal) -> ModalResult {
    match key.code {
        KeyCode::Esc => ModalResult::Cancelled,
        KeyCode::Enter => match modal.to_draft() {
            Ok(draft) => ModalResult::Submitted(draft),
            Err(e) => {
                modal.error = Some(e.to_string());
                ModalResult::Continue
            }
        },
        KeyCode::Char('t') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            modal.toggle_kind();
            ModalResult::Continue
        }
        KeyCode::Tab | KeyCode::Down => {
            modal.next_field();
            ModalResult::Continue
        }
        KeyCode::BackTab | KeyCode::Up => {
            modal.prev_field();
            ModalResult::Continue
        }
        KeyCode::Backspace => {
            modal.backspace();
            ModalResult::Continue
        }
        KeyCode::Char(c) => {
            modal.insert_char(c);
            ModalResult::Continue
        }
        _ => ModalResult::Continue,
    }
}
