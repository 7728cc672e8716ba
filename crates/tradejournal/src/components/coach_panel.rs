//! Coach analysis panel.

use super::{Component, EventResult};
use crate::narrative::CoachAnalysis;
use crate::state::AppState;
use crate::util::styles::{HEADER_COLOR, HELP_COLOR, WARNING_COLOR, gradient_color};
use crossterm::event::KeyEvent;
use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub struct CoachPanel;

impl CoachPanel {
    pub fn new() -> Self {
        Self
    }

    fn labeled(label: &'static str, value: &str) -> Line<'static> {
        Line::from(vec![
            Span::styled(format!("{label}: "), Style::default().fg(HELP_COLOR)),
            Span::raw(value.to_string()),
        ])
    }

    fn momentum_line(analysis: &CoachAnalysis) -> Line<'static> {
        match analysis.momentum_score() {
            Some(score) => {
                let filled = usize::from(score);
                let meter = format!("{}{}", "■".repeat(filled), "□".repeat(10 - filled));
                Line::from(vec![
                    Span::styled("Momentum: ", Style::default().fg(HELP_COLOR)),
                    Span::styled(
                        meter,
                        Style::default().fg(gradient_color(f64::from(score) / 10.0)),
                    ),
                    Span::raw(format!(" {score}/10")),
                ])
            }
            None => Self::labeled("Momentum", &analysis.vibe_report.momentum_rating),
        }
    }

    fn lines(analysis: &CoachAnalysis) -> Vec<Line<'static>> {
        let vibe = &analysis.vibe_report;
        vec![
            Line::from(Span::styled(
                vibe.stoke_meter.clone(),
                Style::default()
                    .fg(HEADER_COLOR)
                    .add_modifier(Modifier::BOLD),
            )),
            Self::labeled("Mustang", &vibe.mustang_progress),
            Self::momentum_line(analysis),
            Line::from(""),
            Line::from(Span::styled(
                format!("\"{}\"", vibe.hype_line),
                Style::default().add_modifier(Modifier::ITALIC),
            )),
            Line::from(Span::styled(
                vibe.reality_check.clone(),
                Style::default().fg(WARNING_COLOR),
            )),
            Line::from(""),
            Line::from(analysis.coach_insights.clone()),
            Line::from(""),
            Line::from(vec![
                Span::styled("Next focus: ", Style::default().fg(HELP_COLOR)),
                Span::styled(
                    analysis.next_focus.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
        ]
    }
}

impl Default for CoachPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for CoachPanel {
    fn handle_key(&mut self, _key: KeyEvent, _state: &mut AppState) -> EventResult {
        EventResult::NotHandled
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let title = if state.session.narrative_busy() {
            " Coach (updating...) "
        } else {
            " Coach "
        };
        let block = Block::default().borders(Borders::ALL).title(title);

        let lines = match state.session.analysis() {
            Some(analysis) => Self::lines(analysis),
            None => vec![Line::from(Span::styled(
                "No analysis yet. Log an entry to hear from the coach.",
                Style::default().fg(HELP_COLOR),
            ))],
        };

        let paragraph = Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_placeholder_lines() {
        let lines = CoachPanel::lines(&CoachAnalysis::placeholder());
        assert_eq!(text(&lines[0]), "Neutral");
        assert_eq!(text(&lines[1]), "Mustang: Idling");
        assert_eq!(text(&lines[2]), "Momentum: Waiting for data");
        assert_eq!(text(&lines[9]), "Next focus: Execution and Risk Management");
    }

    #[test]
    fn test_numeric_momentum_draws_meter() {
        let mut analysis = CoachAnalysis::placeholder();
        analysis.vibe_report.momentum_rating = "7".to_string();
        assert_eq!(
            text(&CoachPanel::momentum_line(&analysis)),
            "Momentum: ■■■■■■■□□□ 7/10"
        );
    }
}
