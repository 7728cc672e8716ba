//! Common rendering helpers for modal widgets.

use std::rc::Rc;

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use super::centered_rect;

/// Render a line of text with a block cursor at the end.
pub fn render_cursor_line(value: &str, prefix: &str) -> Line<'static> {
    Line::from(vec![
        Span::raw(prefix.to_string()),
        Span::raw(value.to_string()),
        Span::styled(" ", Style::default().bg(Color::White).fg(Color::Black)),
    ])
}

/// Keep the tail of `value` visible when it is wider than `max_width`
pub fn tail_fit(value: &str, max_width: usize) -> &str {
    let width = max_width.saturating_sub(2);
    let len = value.chars().count();
    if len <= width {
        return value;
    }
    let skip = len - width;
    let start = value.char_indices().nth(skip).map_or(0, |(i, _)| i);
    &value[start..]
}

/// Result of rendering a modal frame, containing layout information.
pub struct ModalFrame {
    /// The inner area (inside the border)
    pub inner: Rect,
    /// The layout chunks for content placement
    pub chunks: Rc<[Rect]>,
}

/// Render a centered modal with a cleared background, a titled border and a
/// vertical layout of `constraints` inside it.
pub fn render_modal_frame(
    frame: &mut Frame,
    title: &str,
    width: u16,
    height: u16,
    border_color: Color,
    constraints: &[Constraint],
) -> ModalFrame {
    let modal_area = centered_rect(width, height, frame.area());

    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title));

    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    ModalFrame { inner, chunks }
}

/// Builder for modal help text with consistent styling.
///
/// ```ignore
/// let help = HelpText::new()
///     .key("[Enter]", Color::Green, "Save")
///     .key("[Esc]", Color::Yellow, "Cancel")
///     .build();
/// ```
pub struct HelpText {
    items: Vec<(String, Color, String)>,
}

impl HelpText {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn key(mut self, key: &str, color: Color, desc: &str) -> Self {
        self.items.push((key.to_string(), color, desc.to_string()));
        self
    }

    pub fn build(self) -> Paragraph<'static> {
        let mut spans: Vec<Span> = Vec::new();

        for (i, (key, color, desc)) in self.items.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(key, Style::default().fg(color)));
            spans.push(Span::raw(format!(" {}", desc)));
        }

        Paragraph::new(Line::from(spans))
    }

    pub fn build_centered(self) -> Paragraph<'static> {
        self.build().alignment(Alignment::Center)
    }
}

impl Default for HelpText {
    fn default() -> Self {
        Self::new()
    }
}
