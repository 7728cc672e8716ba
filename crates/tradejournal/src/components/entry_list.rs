//! Recent entries, newest first.

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::{format_currency, format_signed_currency};
use crate::util::styles::{HELP_COLOR, PAYOUT_COLOR, pnl_color};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
};
use tradejournal_core::{EntryKind, JournalEntry};

pub struct EntryList;

impl EntryList {
    pub fn new() -> Self {
        Self
    }

    fn item(entry: &JournalEntry) -> ListItem<'static> {
        let (label, amount, color) = match entry.kind {
            EntryKind::Trade { pnl } => ("TRADE ", format_signed_currency(pnl), pnl_color(pnl)),
            EntryKind::Payout { amount } => {
                ("PAYOUT", format!("-{}", format_currency(amount)), PAYOUT_COLOR)
            }
        };

        let mut spans = vec![
            Span::styled(entry.date.to_string(), Style::default().fg(HELP_COLOR)),
            Span::raw("  "),
            Span::styled(label, Style::default().fg(color)),
            Span::raw("  "),
            Span::styled(format!("{amount:>12}"), Style::default().fg(color)),
        ];

        if let Some(setup) = &entry.setup {
            spans.push(Span::raw(format!("  [{setup}]")));
        }
        if let Some(notes) = &entry.notes {
            spans.push(Span::styled(
                format!("  {notes}"),
                Style::default().fg(HELP_COLOR),
            ));
        }

        ListItem::new(Line::from(spans))
    }
}

impl Default for EntryList {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for EntryList {
    fn handle_key(&mut self, key: KeyEvent, state: &mut AppState) -> EventResult {
        let max_scroll = state.session.entries().len().saturating_sub(1);
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                state.entry_scroll = (state.entry_scroll + 1).min(max_scroll);
                EventResult::Handled
            }
            KeyCode::Char('k') | KeyCode::Up => {
                state.entry_scroll = state.entry_scroll.saturating_sub(1);
                EventResult::Handled
            }
            _ => EventResult::NotHandled,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let entries = state.session.entries();
        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Entries ({}) ", entries.len()));

        if entries.is_empty() {
            let paragraph = Paragraph::new(Line::from(Span::styled(
                "Press n to log your first trading day",
                Style::default().fg(HELP_COLOR),
            )))
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }

        let items: Vec<ListItem> = entries
            .iter()
            .rev()
            .skip(state.entry_scroll)
            .map(Self::item)
            .collect();

        frame.render_widget(List::new(items).block(block), area);
    }
}
