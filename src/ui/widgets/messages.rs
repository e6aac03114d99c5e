//! Message log: labelled bubbles, pre-wrapped so scrolling is row-exact.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::{ChatLog, ChatMessage, MessageAuthor};
use crate::ui::markdown;
use crate::ui::theme::{colors, MESSAGE_GAP};
use crate::ui::width::char_width;

const CONTINUATION_INDENT: &str = "    ";

fn label_style(author: MessageAuthor) -> Style {
    let fg = match author {
        MessageAuthor::User => colors::ACCENT,
        MessageAuthor::Assistant => colors::ACCENT_SOFT,
    };
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Split one line into rows of at most `width` display columns, keeping
/// span styles. A char wider than `width` gets a row to itself.
fn wrap_line(line: Line<'static>, width: usize) -> Vec<Line<'static>> {
    let alignment = line.alignment;
    let finish = |spans: Vec<Span<'static>>| {
        let mut l = Line::from(spans);
        l.alignment = alignment;
        l
    };
    if width == 0 {
        return vec![line];
    }

    let mut rows = Vec::new();
    let mut row: Vec<Span<'static>> = Vec::new();
    let mut row_width = 0;
    for span in line.spans {
        let mut chunk = String::new();
        for c in span.content.chars() {
            let w = char_width(c);
            if row_width > 0 && row_width + w > width {
                if !chunk.is_empty() {
                    row.push(Span::styled(std::mem::take(&mut chunk), span.style));
                }
                rows.push(finish(std::mem::take(&mut row)));
                row_width = 0;
            }
            chunk.push(c);
            row_width += w;
        }
        if !chunk.is_empty() {
            row.push(Span::styled(chunk, span.style));
        }
    }
    rows.push(finish(row));
    rows
}

fn message_lines(msg: &ChatMessage) -> Vec<Line<'static>> {
    let body: Vec<Line<'static>> = match msg.author {
        MessageAuthor::Assistant => markdown::to_lines(&msg.text),
        MessageAuthor::User => msg
            .text
            .lines()
            .map(|s| Line::from(Span::styled(s.to_string(), Style::default().fg(colors::TEXT))))
            .collect(),
    };
    let alignment = match msg.author {
        MessageAuthor::User => Alignment::Right,
        MessageAuthor::Assistant => Alignment::Left,
    };

    let mut out = Vec::with_capacity(body.len().max(1));
    let mut body = body.into_iter();
    let mut first = vec![Span::styled(format!("{}: ", msg.author.label()), label_style(msg.author))];
    if let Some(line) = body.next() {
        first.extend(line.spans);
    }
    out.push(Line::from(first).alignment(alignment));
    for line in body {
        let mut spans = vec![Span::raw(CONTINUATION_INDENT)];
        spans.extend(line.spans);
        out.push(Line::from(spans).alignment(alignment));
    }
    out
}

/// Every visual row of the log at `width` columns.
pub fn rows(messages: &[ChatMessage], width: u16) -> Vec<Line<'static>> {
    let mut rows = Vec::new();
    for (i, msg) in messages.iter().enumerate() {
        if i > 0 {
            rows.extend(std::iter::repeat_with(|| Line::from("")).take(MESSAGE_GAP));
        }
        for line in message_lines(msg) {
            rows.extend(wrap_line(line, width as usize));
        }
    }
    rows
}

pub fn row_count(messages: &[ChatMessage], width: u16) -> usize {
    rows(messages, width).len()
}

pub fn render(f: &mut Frame, log: &ChatLog, area: Rect, pending: bool, spinner_char: char) {
    let mut lines = rows(log.messages(), area.width);

    if pending {
        if !lines.is_empty() {
            lines.extend(std::iter::repeat_with(|| Line::from("")).take(MESSAGE_GAP));
        }
        lines.push(Line::from(vec![
            Span::styled("AI: ", label_style(MessageAuthor::Assistant)),
            Span::styled(format!("{spinner_char} "), Style::default().fg(colors::ACCENT)),
            Span::styled("Thinking…", Style::default().fg(colors::TEXT_DIM)),
        ]));
    }

    let height = area.height as usize;
    let offset = log.offset(lines.len(), height);
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
    let para = Paragraph::new(visible).style(Style::default().fg(colors::TEXT).bg(colors::BG));
    f.render_widget(para, area);
}
