//! UI layer: layout, theme, markdown, renderer, widgets.

pub mod layout;
mod markdown;
mod renderer;
pub mod theme;
mod width;

pub mod widgets;

pub use layout::WidgetLayout;
pub use renderer::render;
pub use theme::Theme;
