//! Row of headline stat cards.

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::{format_currency, format_percent, format_signed_currency};
use crate::util::styles::{
    HELP_COLOR, NEGATIVE_COLOR, PAYOUT_COLOR, POSITIVE_COLOR, value_color, win_rate_color,
};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use tradejournal_core::TradingStats;

struct Card {
    title: &'static str,
    value: String,
    color: Color,
    detail: String,
}

pub struct StatsCards;

impl StatsCards {
    pub fn new() -> Self {
        Self
    }

    fn cards(stats: &TradingStats) -> Vec<Card> {
        vec![
            Card {
                title: "Balance",
                value: format_currency(stats.current_balance),
                color: Color::White,
                detail: format!("after {} paid out", format_currency(stats.total_payouts)),
            },
            Card {
                title: "Cumulative P/L",
                value: format_signed_currency(stats.cumulative_pnl),
                color: value_color(stats.cumulative_pnl),
                detail: format!("{} trading days", stats.trading_days),
            },
            Card {
                title: "Daily Avg",
                value: format_signed_currency(stats.daily_average),
                color: value_color(stats.daily_average),
                detail: "per trading day".to_string(),
            },
            Card {
                title: "Win Rate",
                value: format_percent(stats.win_rate),
                color: if stats.trading_days == 0 {
                    HELP_COLOR
                } else {
                    win_rate_color(stats.win_rate)
                },
                detail: format!(
                    "{}W {}L {}F",
                    stats.wins,
                    stats.losses,
                    stats.flat_days()
                ),
            },
            Card {
                title: "Streaks",
                value: format!("+{} / {}", stats.best_streak, stats.worst_streak),
                color: if stats.best_streak >= -stats.worst_streak {
                    POSITIVE_COLOR
                } else {
                    NEGATIVE_COLOR
                },
                detail: "best / worst".to_string(),
            },
            Card {
                title: "Payouts",
                value: format_currency(stats.total_payouts),
                color: PAYOUT_COLOR,
                detail: format!("{} withdrawals", stats.payout_count),
            },
        ]
    }

    fn render_card(frame: &mut Frame, area: Rect, card: Card) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(HELP_COLOR))
            .title(Span::styled(
                format!(" {} ", card.title),
                Style::default().fg(HELP_COLOR),
            ));

        let lines = vec![
            Line::from(Span::styled(
                card.value,
                Style::default().fg(card.color).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.detail, Style::default().fg(HELP_COLOR))),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }
}

impl Default for StatsCards {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for StatsCards {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let cards = Self::cards(state.session.stats());
        let constraints = vec![Constraint::Ratio(1, cards.len() as u32); cards.len()];
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(constraints)
            .split(area);

        for (card, chunk) in cards.into_iter().zip(chunks.iter()) {
            Self::render_card(frame, *chunk, card);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradejournal_core::{AccountConfig, compute};

    #[test]
    fn test_cards_for_empty_journal() {
        let stats = compute(&[], &AccountConfig::default());
        let cards = StatsCards::cards(&stats);

        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0].value, "$50,000.00");
        assert_eq!(cards[1].value, "$0.00");
        assert_eq!(cards[2].value, "$0.00");
        assert_eq!(cards[3].value, "0.0%");
        assert_eq!(cards[3].color, HELP_COLOR);
        assert_eq!(cards[4].value, "+0 / 0");
    }
}
