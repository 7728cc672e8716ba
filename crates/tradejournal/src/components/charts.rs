//! Equity curve, daily P/L bars and the payout curve.

use super::{Component, EventResult};
use crate::state::AppState;
use crate::util::format::{format_compact_currency, format_short_date, format_signed_currency};
use crate::util::styles::{HELP_COLOR, PAYOUT_COLOR, pnl_color, value_color};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
};
use tradejournal_core::series::{DailyBar, SeriesPoint};

pub struct ChartsPanel;

impl ChartsPanel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ChartsPanel {
    fn default() -> Self {
        Self::new()
    }
}

/// Points indexed by position, with a leading zero so a single entry still
/// draws a segment
fn indexed_points(series: &[SeriesPoint]) -> Vec<(f64, f64)> {
    std::iter::once((0.0, 0.0))
        .chain(
            series
                .iter()
                .enumerate()
                .map(|(i, p)| ((i + 1) as f64, p.value)),
        )
        .collect()
}

/// Y bounds that always include zero, padded by 10%
fn value_bounds(points: &[(f64, f64)]) -> [f64; 2] {
    let min = points.iter().map(|(_, y)| *y).fold(0.0, f64::min);
    let max = points.iter().map(|(_, y)| *y).fold(0.0, f64::max);
    let padding = (max - min).abs().max(1.0) * 0.1;
    [min - padding, max + padding]
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block, message: &str) {
    let paragraph = Paragraph::new(Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(HELP_COLOR),
    )))
    .block(block);
    frame.render_widget(paragraph, area);
}

fn render_line_chart(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    series: &[SeriesPoint],
    color: ratatui::style::Color,
    empty_message: &str,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", title));

    if series.is_empty() {
        render_empty(frame, area, block, empty_message);
        return;
    }

    let data = indexed_points(series);
    let [y_min, y_max] = value_bounds(&data);
    let x_max = series.len() as f64;

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(&data);

    let first = series.first().map(|p| format_short_date(p.date)).unwrap_or_default();
    let last = series.last().map(|p| format_short_date(p.date)).unwrap_or_default();

    let x_axis = Axis::default()
        .bounds([0.0, x_max])
        .labels(vec![Span::raw(first), Span::raw(last)])
        .style(Style::default().fg(HELP_COLOR));

    let y_axis = Axis::default()
        .bounds([y_min, y_max])
        .labels(vec![
            Span::raw(format_compact_currency(y_min)),
            Span::raw(format_compact_currency((y_min + y_max) / 2.0)),
            Span::raw(format_compact_currency(y_max)),
        ])
        .style(Style::default().fg(HELP_COLOR));

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Bars are drawn by magnitude; color and the value label carry the sign
fn daily_bars(bars: &[DailyBar]) -> Vec<Bar<'static>> {
    bars.iter()
        .map(|bar| {
            let style = Style::default().fg(pnl_color(bar.pnl));
            Bar::default()
                .value(bar.pnl.abs().round() as u64)
                .label(Line::from(bar.date.strftime("%d").to_string()))
                .text_value(format_compact_currency(bar.pnl))
                .style(style)
                .value_style(style.add_modifier(Modifier::REVERSED))
        })
        .collect()
}

fn render_daily_bars(frame: &mut Frame, area: Rect, bars: &[DailyBar]) {
    let total: f64 = bars.iter().map(|b| b.pnl).sum();
    let block = Block::default().borders(Borders::ALL).title(Line::from(vec![
        Span::raw(format!(" Daily P/L (last {}) ", bars.len())),
        Span::styled(
            format!("{} ", format_signed_currency(total)),
            Style::default().fg(value_color(total)),
        ),
    ]));

    if bars.is_empty() {
        render_empty(frame, area, block, "No trading days yet");
        return;
    }

    let inner_width = block.inner(area).width as usize;
    let bar_width = (inner_width / bars.len().max(1)).saturating_sub(1).clamp(1, 7) as u16;

    let data = daily_bars(bars);
    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&data))
        .bar_width(bar_width)
        .bar_gap(1)
        .direction(Direction::Vertical);

    frame.render_widget(chart, area);
}

impl Component for ChartsPanel {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);

        let charts = &state.charts;
        let pnl_color = charts
            .cumulative_pnl
            .last()
            .map_or(HELP_COLOR, |p| value_color(p.value));

        render_line_chart(
            frame,
            rows[0],
            "Cumulative P/L",
            &charts.cumulative_pnl,
            pnl_color,
            "Log a trading day to start the equity curve",
        );
        render_daily_bars(frame, bottom[0], &charts.daily_bars);
        render_line_chart(
            frame,
            bottom[1],
            "Cumulative Payouts",
            &charts.cumulative_payouts,
            PAYOUT_COLOR,
            "No payouts yet",
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_indexed_points_start_at_origin() {
        let series = vec![
            SeriesPoint {
                date: date(2024, 1, 2),
                value: 100.0,
                delta: 100.0,
            },
            SeriesPoint {
                date: date(2024, 1, 3),
                value: 40.0,
                delta: -60.0,
            },
        ];
        assert_eq!(
            indexed_points(&series),
            vec![(0.0, 0.0), (1.0, 100.0), (2.0, 40.0)]
        );
    }

    #[test]
    fn test_value_bounds_include_zero() {
        let [lo, hi] = value_bounds(&[(0.0, 0.0), (1.0, 500.0), (2.0, 300.0)]);
        assert!(lo < 0.0);
        assert!(hi > 500.0);

        let [lo, hi] = value_bounds(&[(0.0, 0.0), (1.0, -200.0)]);
        assert!(lo < -200.0);
        assert!(hi > 0.0);
    }

    #[test]
    fn test_daily_bars_use_magnitude() {
        let bars = daily_bars(&[
            DailyBar {
                date: date(2024, 1, 2),
                pnl: -240.4,
            },
            DailyBar {
                date: date(2024, 1, 3),
                pnl: 0.0,
            },
        ]);
        assert_eq!(bars.len(), 2);
    }
}
