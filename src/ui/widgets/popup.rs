//! Popup chrome: frame, title bar, close control.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme::{colors, Theme, CLOSE_WIDTH};

/// Truncate to `max_chars` with a trailing ellipsis.
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let keep = max_chars.saturating_sub(1);
    format!("{}…", s.chars().take(keep).collect::<String>())
}

/// Clear the popup area and draw its frame and header.
pub fn render(f: &mut Frame, popup: Rect, header: Rect, title: &str, theme: &Theme) {
    f.render_widget(Clear, popup);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::ELEVATED));
    f.render_widget(block, popup);

    let width = header.width as usize;
    let close = CLOSE_WIDTH as usize;
    let title_room = width.saturating_sub(close + 1);
    let title = truncate(title, title_room);
    let pad = width.saturating_sub(1 + title.chars().count() + close);
    let fill = theme.primary_fill();
    let line = Line::from(vec![
        Span::styled(" ", fill),
        Span::styled(title, fill),
        Span::styled(" ".repeat(pad), fill),
        Span::styled(" ✕ ", fill),
    ]);
    f.render_widget(Paragraph::new(line), header);
}
