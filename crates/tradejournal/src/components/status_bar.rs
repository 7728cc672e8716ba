use super::{Component, EventResult};
use crate::state::{AppState, StatusKind};
use crate::util::styles::{HELP_COLOR, NEGATIVE_COLOR, POSITIVE_COLOR};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

const HELP_TEXT: &str = "n: new entry | j/k: scroll entries | q: quit";

pub struct StatusBar;

impl StatusBar {
    pub fn new() -> Self {
        Self
    }
}

impl Default for StatusBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatusBar {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let content = match &state.status {
            Some(status) if status.kind == StatusKind::Error => Line::from(vec![
                Span::styled("Error: ", Style::default().fg(NEGATIVE_COLOR)),
                Span::raw(status.text.clone()),
            ]),
            Some(status) => Line::from(vec![
                Span::styled(status.text.clone(), Style::default().fg(POSITIVE_COLOR)),
                Span::styled(format!("  ({HELP_TEXT})"), Style::default().fg(HELP_COLOR)),
            ]),
            None => Line::from(Span::styled(HELP_TEXT, Style::default().fg(Color::DarkGray))),
        };

        let paragraph = Paragraph::new(content).block(Block::default().borders(Borders::TOP));

        frame.render_widget(paragraph, area);
    }
}
