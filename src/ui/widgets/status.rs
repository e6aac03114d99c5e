//! Host status line: widget state on the left, shortcuts on the right.

use ratatui::{layout::Rect, style::Style, text::Span, widgets::Paragraph, Frame};

use crate::ui::theme::colors;

pub fn render(f: &mut Frame, area: Rect, popup_open: bool, pending: bool, spinner_char: char) {
    let left = if pending {
        format!(" {spinner_char} Waiting for reply…")
    } else {
        " Ready".to_string()
    };
    let right = if popup_open {
        " Enter send  PgUp/PgDn scroll  Esc close  Ctrl+C quit "
    } else {
        " Enter open chat  q quit "
    };
    let width = area.width as usize;
    let pad = width.saturating_sub(left.chars().count() + right.chars().count());
    let line = format!("{left}{}{right}", " ".repeat(pad));
    let span = Span::styled(line, Style::default().fg(colors::MUTED));
    f.render_widget(Paragraph::new(span), area);
}
