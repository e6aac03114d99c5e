//! Draw the widget into its render root: status line, button, optional popup.

use ratatui::layout::Rect;
use ratatui::Frame;

use crate::ui::layout;
use crate::ui::theme::{Theme, SPINNER};
use crate::ui::widgets::{render_button, render_input, render_messages, render_popup, render_status};
use crate::widget::{ChatWidget, PLACEHOLDER, TITLE};

/// Renders nothing outside `root`; an unmounted widget renders nothing at all.
pub fn render(f: &mut Frame, root: Rect, widget: &ChatWidget, theme: &Theme, tick: usize) {
    if !widget.is_mounted() {
        return;
    }
    let regions = layout::compute(root);
    let state = &widget.state;
    let spinner_char = SPINNER[tick % SPINNER.len()];

    let status = Rect {
        x: root.x,
        y: root.bottom().saturating_sub(1),
        width: root.width,
        height: root.height.min(1),
    };
    render_status(f, status, state.popup_open, state.is_pending(), spinner_char);
    render_button(f, regions.button, state.popup_open, theme);

    if state.popup_open && regions.popup.height > 2 {
        render_popup(f, regions.popup, regions.header, TITLE, theme);
        render_messages(f, &state.log, regions.messages, state.is_pending(), spinner_char);
        render_input(
            f,
            &state.input,
            PLACEHOLDER,
            regions.input,
            state.is_pending(),
            spinner_char,
            theme,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{ChatBackend, ChatRequest};
    use crate::error::ChatError;
    use crate::state::MessageAuthor;
    use crate::widget::GREETING;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    struct Offline;

    impl ChatBackend for Offline {
        fn send(&self, _request: &ChatRequest) -> Result<String, ChatError> {
            Err(ChatError::Network("offline".into()))
        }
    }

    fn screen(widget: &ChatWidget) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).unwrap();
        terminal
            .draw(|f| {
                let area = f.area();
                render(f, area, widget, &Theme::default(), 0)
            })
            .unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        let mut out = String::new();
        for (i, cell) in buffer.content().iter().enumerate() {
            out.push_str(cell.symbol());
            if (i + 1) % width == 0 {
                out.push('\n');
            }
        }
        out
    }

    #[test]
    fn closed_popup_shows_only_button() {
        let mut w = ChatWidget::new(Arc::new(Offline), "en");
        w.mount();
        let s = screen(&w);
        assert!(s.contains("AI"));
        assert!(!s.contains(TITLE));
    }

    #[test]
    fn open_popup_shows_title_log_and_placeholder() {
        let mut w = ChatWidget::new(Arc::new(Offline), "en");
        w.mount();
        w.toggle_popup();
        w.add_message("Is Nathula open?", MessageAuthor::User);
        let s = screen(&w);
        assert!(s.contains(TITLE));
        assert!(s.contains("You: Is Nathula open?"));
        assert!(s.contains("AI: Hello!"));
        assert!(s.contains(crate::widget::PLACEHOLDER));
        assert!(GREETING.starts_with("Hello!"));
    }

    #[test]
    fn unmounted_widget_draws_nothing() {
        let w = ChatWidget::new(Arc::new(Offline), "en");
        assert!(screen(&w).trim().is_empty());
    }
}
