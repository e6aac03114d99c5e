//! Assistant replies as lightweight markdown: headings, lists, code, bold,
//! italics, rules. Anything else degrades to plain text.

use pulldown_cmark::{Event, Options, Parser, Tag};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::colors;

#[derive(Default)]
struct LineBuilder {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    in_code_block: bool,
    in_heading: bool,
    strong: usize,
    emphasis: usize,
    /// One entry per open list: next ordinal, or None for bullets.
    lists: Vec<Option<u64>>,
}

impl LineBuilder {
    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.current)));
        }
    }

    fn text_style(&self) -> Style {
        let mut style = Style::default().fg(colors::TEXT);
        if self.in_heading {
            style = style.fg(colors::HEADING).add_modifier(Modifier::BOLD);
        }
        if self.strong > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.emphasis > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }

    fn code_line(&mut self, text: &str) {
        self.lines.push(Line::from(vec![
            Span::styled("┃ ", Style::default().fg(colors::BORDER).bg(colors::CODE_BG)),
            Span::styled(text.to_string(), Style::default().fg(colors::TEXT).bg(colors::CODE_BG)),
        ]));
    }

    fn bullet(&mut self) {
        let depth = self.lists.len().saturating_sub(1);
        let indent = "  ".repeat(depth);
        let marker = match self.lists.last_mut() {
            Some(Some(n)) => {
                let m = format!("{indent}{n}. ");
                *n += 1;
                m
            }
            _ => format!("{indent}{}", if depth == 0 { "• " } else { "◦ " }),
        };
        self.current.push(Span::styled(marker, Style::default().fg(colors::ACCENT)));
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                self.flush();
                self.in_code_block = true;
            }
            Event::End(Tag::CodeBlock(_)) => self.in_code_block = false,

            Event::Start(Tag::Heading(..)) => {
                self.flush();
                self.in_heading = true;
            }
            Event::End(Tag::Heading(..)) => {
                self.in_heading = false;
                self.flush();
            }

            Event::Start(Tag::List(start)) => {
                self.flush();
                self.lists.push(start);
            }
            Event::End(Tag::List(_)) => {
                self.lists.pop();
            }
            Event::Start(Tag::Item) => self.bullet(),
            Event::End(Tag::Item) => self.flush(),

            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(Tag::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(Tag::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),

            Event::Text(t) if self.in_code_block => {
                for line in t.lines() {
                    self.code_line(line);
                }
            }
            Event::Text(t) => {
                let style = self.text_style();
                self.current.push(Span::styled(t.to_string(), style));
            }
            Event::Code(t) => {
                self.current.push(Span::styled(
                    t.to_string(),
                    Style::default().fg(colors::ACCENT).bg(colors::CODE_BG),
                ));
            }

            Event::SoftBreak | Event::HardBreak | Event::End(Tag::Paragraph) => self.flush(),
            Event::Rule => {
                self.flush();
                self.lines.push(Line::from(Span::styled(
                    "────────────────",
                    Style::default().fg(colors::BORDER),
                )));
            }
            _ => {}
        }
    }
}

/// Convert markdown to owned lines. Never returns an empty vec.
pub fn to_lines(md: &str) -> Vec<Line<'static>> {
    let mut builder = LineBuilder::default();
    for event in Parser::new_ext(md, Options::ENABLE_STRIKETHROUGH) {
        builder.event(event);
    }
    builder.flush();
    if builder.lines.is_empty() {
        builder.lines.push(Line::from(""));
    }
    builder.lines
}
