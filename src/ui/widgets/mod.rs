//! Widget parts: floating button, popup chrome, message log, input bar, status line.

mod button;
mod input;
pub mod messages;
mod popup;
mod status;

pub use button::render as render_button;
pub use input::render as render_input;
pub use messages::render as render_messages;
pub use popup::render as render_popup;
pub use status::render as render_status;
