//! Payout goal gauge with the projected days to goal.

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::{format_currency, format_signed_currency};
use crate::util::styles::{HELP_COLOR, POSITIVE_COLOR, gradient_color};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
};
use tradejournal_core::TradingStats;

pub struct GoalPanel;

impl GoalPanel {
    pub fn new() -> Self {
        Self
    }

    /// Text under the gauge
    fn projection_line(stats: &TradingStats) -> String {
        if stats.remaining_to_goal <= 0.0 {
            return "Goal reached. Protect the account.".to_string();
        }

        match stats.projected_days_to_goal {
            Some(days) => format!(
                "{} to go | ~{} trading days at {}/day",
                format_currency(stats.remaining_to_goal),
                days,
                format_signed_currency(stats.daily_average)
            ),
            None => format!(
                "{} to go | no projection until the daily average is positive",
                format_currency(stats.remaining_to_goal)
            ),
        }
    }
}

impl Default for GoalPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for GoalPanel {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let stats = state.session.stats();
        let goal = state.session.settings().account.profit_goal;

        let block = Block::default()
            .borders(Borders::ALL)
            .title(format!(" Payout Goal ({}) ", format_currency(goal)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(inner);

        let ratio = (stats.profit_goal_progress / 100.0).clamp(0.0, 1.0);
        let color = if ratio >= 1.0 {
            POSITIVE_COLOR
        } else {
            gradient_color(ratio)
        };

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(ratio)
            .label(format!(
                "{} / {} ({:.1}%)",
                format_currency(stats.total_payouts),
                format_currency(goal),
                stats.profit_goal_progress
            ));
        frame.render_widget(gauge, chunks[0]);

        let projection = Paragraph::new(Line::from(Span::styled(
            Self::projection_line(stats),
            Style::default().fg(HELP_COLOR),
        )));
        frame.render_widget(projection, chunks[1]);
    }
}
