//! Input bar: prompt, text or placeholder, send control.

use ratatui::{
    layout::{Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::state::InputLine;
use crate::ui::theme::{colors, Theme, SEND_WIDTH};
use crate::ui::width::{char_width, str_width};

const PROMPT: &str = " ▸ ";

/// Chars to skip so the text before the cursor, plus the cursor cell, fits
/// in `room` columns. `widths` holds the display width of each char before
/// the cursor.
fn scroll_offset(widths: &[usize], room: usize) -> usize {
    if room == 0 {
        return widths.len();
    }
    let mut used = 1;
    let mut skip = widths.len();
    while skip > 0 && used + widths[skip - 1] <= room {
        skip -= 1;
        used += widths[skip];
    }
    skip
}

/// Leading chars of `chars` that fit in `room` columns.
fn fit(chars: &[char], room: usize) -> String {
    let mut used = 0;
    chars
        .iter()
        .take_while(|c| {
            used += char_width(**c);
            used <= room
        })
        .collect()
}

pub fn render(
    f: &mut Frame,
    input: &InputLine,
    placeholder: &str,
    area: Rect,
    pending: bool,
    spinner_char: char,
    theme: &Theme,
) {
    let block = Block::default()
        .style(Style::default().bg(colors::ELEVATED))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors::BORDER))
        .border_type(BorderType::Plain);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let prompt_w = str_width(PROMPT);
    let room = (inner.width as usize).saturating_sub(prompt_w + SEND_WIDTH as usize);
    let chars: Vec<char> = input.value().chars().collect();
    let before = input.value().get(..input.cursor()).map(|s| s.chars().count()).unwrap_or(0);
    let widths: Vec<usize> = chars[..before].iter().map(|c| char_width(*c)).collect();
    let skip = scroll_offset(&widths, room);

    let text = if input.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(colors::MUTED))
    } else {
        Span::styled(fit(&chars[skip..], room), Style::default().fg(colors::TEXT))
    };
    let line = Line::from(vec![
        Span::styled(PROMPT, Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
        text,
    ]);
    f.render_widget(Paragraph::new(line), inner);

    // Disabled while a reply is pending.
    let send = Rect {
        x: inner.right().saturating_sub(SEND_WIDTH),
        y: inner.y,
        width: SEND_WIDTH.min(inner.width),
        height: inner.height.min(1),
    };
    let control = if pending {
        Span::styled(format!(" {spinner_char} "), Style::default().fg(colors::MUTED))
    } else {
        Span::styled(" ➤ ", theme.primary_fill())
    };
    f.render_widget(Paragraph::new(Line::from(control)), send);

    let cursor_x = inner.x + (prompt_w + widths[skip..].iter().sum::<usize>()) as u16;
    let x = cursor_x.min(inner.x + inner.width.saturating_sub(1));
    f.set_cursor_position(Position { x, y: inner.y });
}
