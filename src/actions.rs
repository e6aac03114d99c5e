//! User intents the widget reacts to.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,

    TogglePopup,
    ClosePopup,

    Char(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearInput,
    Submit,

    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
}
