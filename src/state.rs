//! Widget state: message log, popup visibility, input line.

/// Who wrote a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageAuthor {
    User,
    Assistant,
}

impl MessageAuthor {
    pub fn label(self) -> &'static str {
        match self {
            MessageAuthor::User => "You",
            MessageAuthor::Assistant => "AI",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub author: MessageAuthor,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: String) -> Self {
        Self { author: MessageAuthor::User, text }
    }
    pub fn assistant(text: String) -> Self {
        Self { author: MessageAuthor::Assistant, text }
    }
}

/// Append-only log. `scroll` is a row offset, only honoured while
/// `follow` is off.
#[derive(Clone, Debug)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    pub scroll: usize,
    pub follow: bool,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self { messages: Vec::new(), scroll: 0, follow: true }
    }
}

impl ChatLog {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Append and snap the view to the newest entry.
    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
        self.follow = true;
    }

    pub fn scroll_up(&mut self, rows: usize, max_scroll: usize) {
        let from = if self.follow { max_scroll } else { self.scroll.min(max_scroll) };
        self.scroll = from.saturating_sub(rows);
        self.follow = false;
    }

    pub fn scroll_down(&mut self, rows: usize, max_scroll: usize) {
        if self.follow {
            return;
        }
        self.scroll = self.scroll.saturating_add(rows);
        if self.scroll >= max_scroll {
            self.scroll = max_scroll;
            self.follow = true;
        }
    }

    /// Row offset to render given the total wrapped rows and viewport height.
    pub fn offset(&self, total_rows: usize, height: usize) -> usize {
        let max_scroll = total_rows.saturating_sub(height);
        if self.follow {
            max_scroll
        } else {
            self.scroll.min(max_scroll)
        }
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Single-line text input with a byte-offset cursor on a char boundary.
#[derive(Clone, Debug, Default)]
pub struct InputLine {
    buffer: String,
    cursor: usize,
}

impl InputLine {
    pub fn value(&self) -> &str {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        let pos = self.cursor.min(self.buffer.len());
        self.buffer.insert(pos, c);
        self.cursor = pos + c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.remove(idx);
            self.cursor = idx;
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn left(&mut self) {
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.cursor = idx;
        }
    }

    pub fn right(&mut self) {
        if let Some(c) = self.buffer[self.cursor..].chars().next() {
            self.cursor += c.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.buffer.len();
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }
}

/// Everything the widget renders from.
#[derive(Clone, Debug, Default)]
pub struct WidgetState {
    pub popup_open: bool,
    pub log: ChatLog,
    pub input: InputLine,
    /// Sequence id of the request awaiting a reply, if any.
    pub pending: Option<u64>,
}

impl WidgetState {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
