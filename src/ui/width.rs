//! Terminal display width, measured the way ratatui lays out spans.

use ratatui::text::Span;

/// Columns `c` occupies: 2 for wide CJK and emoji, 0 for combining and control chars.
pub fn char_width(c: char) -> usize {
    let mut buf = [0u8; 4];
    Span::raw(&*c.encode_utf8(&mut buf)).width()
}

pub fn str_width(s: &str) -> usize {
    s.chars().map(char_width).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_and_narrow() {
        assert_eq!(char_width('a'), 1);
        assert_eq!(char_width('寺'), 2);
        assert_eq!(str_width("AI: 寺院"), 8);
    }
}
