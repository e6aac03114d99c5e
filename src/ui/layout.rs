//! Widget geometry: button anchored bottom-right, popup stacked above it.

use ratatui::layout::{Constraint, Layout, Rect};

use super::theme::{
    BUTTON_HEIGHT, BUTTON_WIDTH, CLOSE_WIDTH, HEADER_HEIGHT, INPUT_HEIGHT, MARGIN_X, MARGIN_Y,
    POPUP_GAP, POPUP_HEIGHT, POPUP_WIDTH, SEND_WIDTH,
};

/// Every region the widget draws into or hit-tests against. Popup regions
/// are computed even while the popup is hidden.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WidgetLayout {
    pub button: Rect,
    pub popup: Rect,
    pub header: Rect,
    pub close: Rect,
    pub messages: Rect,
    pub input: Rect,
    pub send: Rect,
}

fn shrink(r: Rect, by: u16) -> Rect {
    Rect {
        x: r.x.saturating_add(by),
        y: r.y.saturating_add(by),
        width: r.width.saturating_sub(2 * by),
        height: r.height.saturating_sub(2 * by),
    }
}

/// Lay the widget out inside `root`, its private render root.
pub fn compute(root: Rect) -> WidgetLayout {
    let bw = BUTTON_WIDTH.min(root.width);
    let bh = BUTTON_HEIGHT.min(root.height);
    let button = Rect {
        x: root.right().saturating_sub(bw + MARGIN_X).max(root.x),
        y: root.bottom().saturating_sub(bh + MARGIN_Y).max(root.y),
        width: bw,
        height: bh,
    };

    let popup_w = POPUP_WIDTH.min(root.width.saturating_sub(2 * MARGIN_X));
    let popup_bottom = button.y.saturating_sub(POPUP_GAP).max(root.y);
    let popup_h = POPUP_HEIGHT.min(popup_bottom - root.y);
    let popup = Rect {
        x: root.right().saturating_sub(popup_w + MARGIN_X).max(root.x),
        y: popup_bottom - popup_h,
        width: popup_w,
        height: popup_h,
    };

    let inner = shrink(popup, 1);
    let rows = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(1),
        Constraint::Length(INPUT_HEIGHT),
    ])
    .split(inner);
    let (header, messages, input) = (rows[0], rows[1], rows[2]);

    let close = Rect {
        x: header.right().saturating_sub(CLOSE_WIDTH),
        y: header.y,
        width: CLOSE_WIDTH.min(header.width),
        height: header.height.min(1),
    };
    // Send control sits on the text row, below the input's top border.
    let send = Rect {
        x: input.right().saturating_sub(SEND_WIDTH),
        y: input.y + input.height.saturating_sub(1),
        width: SEND_WIDTH.min(input.width),
        height: input.height.min(1),
    };

    WidgetLayout { button, popup, header, close, messages, input, send }
}
