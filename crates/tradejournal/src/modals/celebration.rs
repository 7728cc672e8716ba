use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use super::ModalResult;
use super::helpers::{HelpText, render_modal_frame};
use crate::state::CelebrationModal;
use crate::util::format::format_currency;
use crate::util::styles::{HELP_COLOR, POSITIVE_COLOR};

const BANNER: &str = "★ ★ ★  GOAL REACHED  ★ ★ ★";

pub fn render_celebration_modal(frame: &mut Frame, modal: &CelebrationModal) {
    let mf = render_modal_frame(
        frame,
        "Payout Goal",
        52,
        10,
        Color::Yellow,
        &[
            Constraint::Length(1),
            Constraint::Length(2), // Banner
            Constraint::Length(3), // Numbers
            Constraint::Min(0),
            Constraint::Length(1), // Help
        ],
    );

    let banner = Paragraph::new(Line::from(Span::styled(
        BANNER,
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(banner, mf.chunks[1]);

    let lines = vec![
        Line::from(vec![
            Span::raw("Total payouts "),
            Span::styled(
                format_currency(modal.total_payouts),
                Style::default()
                    .fg(POSITIVE_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Goal of {} complete.", format_currency(modal.profit_goal)),
            Style::default().fg(HELP_COLOR),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        mf.chunks[2],
    );

    let help = HelpText::new()
        .key("[Esc]", Color::Yellow, "Back to the journal")
        .build_centered();
    frame.render_widget(help, mf.chunks[4]);
}

pub fn handle_celebration_key(key: KeyEvent) -> ModalResult {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char(' ') => ModalResult::Cancelled,
        _ => ModalResult::Continue,
    }
}
