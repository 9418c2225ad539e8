//! Search/filter bar widget

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Search bar state; `cursor_pos` counts chars, not bytes
pub struct SearchBar {
    pub query: String,
    pub active: bool,
    pub cursor_pos: usize,
}

impl SearchBar {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            active: false,
            cursor_pos: 0,
        }
    }

    pub fn activate(&mut self) {
        self.active = true;
        self.cursor_pos = self.len();
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor_pos = 0;
    }

    pub fn insert(&mut self, c: char) {
        let at = self.byte_offset(self.cursor_pos);
        self.query.insert(at, c);
        self.cursor_pos += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
            let at = self.byte_offset(self.cursor_pos);
            self.query.remove(at);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor_pos < self.len() {
            let at = self.byte_offset(self.cursor_pos);
            self.query.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor_pos > 0 {
            self.cursor_pos -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor_pos < self.len() {
            self.cursor_pos += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor_pos = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor_pos = self.len();
    }

    /// Apply a line-editing key; returns false for keys it does not handle
    pub fn edit(&mut self, key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_home(),
            KeyCode::End => self.move_end(),
            KeyCode::Char(c) => self.insert(c),
            _ => return false,
        }
        true
    }

    fn len(&self) -> usize {
        self.query.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.query
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    /// Render with the active search scope shown in the title
    pub fn render(&self, frame: &mut Frame, area: Rect, scope: &str, style: Style, focused_style: Style) {
        let border_style = if self.active { focused_style } else { style };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(format!(" Search [{}] (/ to edit, f scope, Esc to clear) ", scope));

        let display_text = if self.query.is_empty() && !self.active {
            "Type to search...".to_string()
        } else {
            self.query.clone()
        };

        let paragraph = Paragraph::new(display_text)
            .block(block)
            .style(style);

        frame.render_widget(paragraph, area);

        // Show cursor if active
        if self.active {
            frame.set_cursor_position((
                area.x + 1 + self.cursor_pos as u16,
                area.y + 1,
            ));
        }
    }
}

impl Default for SearchBar {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editing_is_char_aware() {
        let mut bar = SearchBar::new();
        bar.activate();
        for c in "6'4\"é".chars() {
            bar.insert(c);
        }
        assert_eq!(bar.cursor_pos, 5);

        bar.move_left();
        bar.backspace();
        assert_eq!(bar.query, "6'4é");

        bar.move_end();
        bar.backspace();
        assert_eq!(bar.query, "6'4");

        bar.move_home();
        bar.delete();
        assert_eq!(bar.query, "'4");
    }

    #[test]
    fn edit_ignores_non_editing_keys() {
        use crossterm::event::KeyModifiers;
        let mut bar = SearchBar::new();
        assert!(bar.edit(&KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE)));
        assert!(!bar.edit(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
        assert!(!bar.edit(&KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE)));
        assert_eq!(bar.query, "g");
    }

    #[test]
    fn clear_resets_cursor() {
        let mut bar = SearchBar::new();
        bar.insert('a');
        bar.clear();
        assert_eq!(bar.cursor_pos, 0);
        assert!(bar.query.is_empty());
    }
}
