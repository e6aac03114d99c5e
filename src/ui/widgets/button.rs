//! Floating chat button.

use ratatui::{
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, open: bool, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.primary_fg())
        .style(theme.primary_fill());
    let label = if open { "✕" } else { "AI" };
    let para = Paragraph::new(label).alignment(Alignment::Center).block(block);
    f.render_widget(Clear, area);
    f.render_widget(para, area);
}
