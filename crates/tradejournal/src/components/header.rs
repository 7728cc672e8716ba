use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::format_currency_short;
use crate::util::styles::{HEADER_COLOR, HELP_COLOR, WARNING_COLOR};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// Title line with the account size and the coach state
pub struct Header;

impl Header {
    pub fn new() -> Self {
        Self
    }

    fn coach_label(state: &AppState) -> Span<'static> {
        let session = &state.session;
        if session.narrative_busy() {
            Span::styled("coach: thinking...", Style::default().fg(WARNING_COLOR))
        } else if session.narrative_enabled() {
            Span::styled("coach: online", Style::default().fg(HEADER_COLOR))
        } else {
            Span::styled("coach: offline", Style::default().fg(HELP_COLOR))
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for Header {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let account = &state.session.settings().account;
        let title = Line::from(vec![
            Span::styled(
                " TRADE JOURNAL ",
                Style::default()
                    .fg(HEADER_COLOR)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(
                    "{} account | goal {} in payouts",
                    format_currency_short(account.initial_balance),
                    format_currency_short(account.profit_goal)
                ),
                Style::default().fg(HELP_COLOR),
            ),
        ]);

        let coach = Line::from(Self::coach_label(state)).alignment(Alignment::Right);

        let block = Block::default().borders(Borders::BOTTOM);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        frame.render_widget(Paragraph::new(title), inner);
        frame.render_widget(Paragraph::new(coach), inner);
    }
}
