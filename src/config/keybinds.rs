//! Keyboard shortcut definitions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Keyboard shortcut configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    // Global
    pub quit: KeyBind,
    pub help: KeyBind,
    pub refresh: KeyBind,

    // Screen navigation
    pub next_tab: KeyBind,
    pub prev_tab: KeyBind,

    // Grid
    pub activate: KeyBind,
    pub filter: KeyBind,
    pub clear_filter: KeyBind,
    pub cycle_scope: KeyBind,
    pub next_page: KeyBind,
    pub next_page_alt: KeyBind,
    pub prev_page: KeyBind,
    pub prev_page_alt: KeyBind,
    pub header_left: KeyBind,
    pub header_right: KeyBind,
    pub sort: KeyBind,
    pub page_size: KeyBind,
    pub next_grid: KeyBind,

    // Assistant
    pub compose: KeyBind,
    pub send: KeyBind,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            // Global
            quit: KeyBind::new(KeyCode::Char('q'), KeyModifiers::NONE),
            help: KeyBind::new(KeyCode::Char('?'), KeyModifiers::NONE),
            refresh: KeyBind::new(KeyCode::Char('r'), KeyModifiers::NONE),

            // Screen navigation
            next_tab: KeyBind::new(KeyCode::Tab, KeyModifiers::NONE),
            prev_tab: KeyBind::new(KeyCode::BackTab, KeyModifiers::SHIFT),

            // Grid
            activate: KeyBind::new(KeyCode::Enter, KeyModifiers::NONE),
            filter: KeyBind::new(KeyCode::Char('/'), KeyModifiers::NONE),
            clear_filter: KeyBind::new(KeyCode::Esc, KeyModifiers::NONE),
            cycle_scope: KeyBind::new(KeyCode::Char('f'), KeyModifiers::NONE),
            next_page: KeyBind::new(KeyCode::Char('n'), KeyModifiers::NONE),
            next_page_alt: KeyBind::new(KeyCode::Right, KeyModifiers::NONE),
            prev_page: KeyBind::new(KeyCode::Char('p'), KeyModifiers::NONE),
            prev_page_alt: KeyBind::new(KeyCode::Left, KeyModifiers::NONE),
            header_left: KeyBind::new(KeyCode::Char(','), KeyModifiers::NONE),
            header_right: KeyBind::new(KeyCode::Char('.'), KeyModifiers::NONE),
            sort: KeyBind::new(KeyCode::Char('s'), KeyModifiers::NONE),
            page_size: KeyBind::new(KeyCode::Char('z'), KeyModifiers::NONE),
            next_grid: KeyBind::new(KeyCode::Char('w'), KeyModifiers::NONE),

            // Assistant
            compose: KeyBind::new(KeyCode::Char('i'), KeyModifiers::NONE),
            send: KeyBind::new(KeyCode::Enter, KeyModifiers::NONE),
        }
    }
}

impl KeyBindings {
    pub fn is_next_page(&self, key: &KeyEvent) -> bool {
        self.next_page.matches_event(key) || self.next_page_alt.matches_event(key)
    }

    pub fn is_prev_page(&self, key: &KeyEvent) -> bool {
        self.prev_page.matches_event(key) || self.prev_page_alt.matches_event(key)
    }
}

/// A single key binding
#[derive(Debug, Clone)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn matches(&self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.code == code && self.modifiers == modifiers
    }

    pub fn matches_event(&self, key: &KeyEvent) -> bool {
        self.matches(key.code, key.modifiers)
    }

    /// Short label for help and hint lines
    pub fn label(&self) -> String {
        let key = match self.code {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::BackTab => "S-Tab".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            other => format!("{:?}", other),
        };
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            format!("C-{}", key)
        } else {
            key
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_keys_have_alternatives() {
        let keys = KeyBindings::default();
        assert!(keys.is_next_page(&KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE)));
        assert!(keys.is_next_page(&KeyEvent::new(KeyCode::Right, KeyModifiers::NONE)));
        assert!(keys.is_prev_page(&KeyEvent::new(KeyCode::Left, KeyModifiers::NONE)));
        assert!(!keys.is_prev_page(&KeyEvent::new(KeyCode::Char('p'), KeyModifiers::CONTROL)));
    }

    #[test]
    fn labels() {
        let keys = KeyBindings::default();
        assert_eq!(keys.filter.label(), "/");
        assert_eq!(keys.clear_filter.label(), "Esc");
        assert_eq!(KeyBind::new(KeyCode::Char('c'), KeyModifiers::CONTROL).label(), "C-c");
    }
}
