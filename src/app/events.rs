//! Input event handling

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use std::time::Duration;

/// Application input events
#[derive(Debug, Clone)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Tick,
    Resize(u16, u16),
}

/// Event handler for terminal input
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    /// Poll for the next event
    pub fn next(&self) -> Option<AppEvent> {
        if event::poll(self.tick_rate).ok()? {
            match event::read().ok()? {
                Event::Key(key) => Some(AppEvent::Key(key)),
                Event::Mouse(mouse) => Some(AppEvent::Mouse(mouse)),
                Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
                _ => None,
            }
        } else {
            Some(AppEvent::Tick)
        }
    }
}

/// Check if this is a quit key combination
pub fn is_quit(event: &KeyEvent) -> bool {
    matches!(
        (event.code, event.modifiers),
        (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Char('c'), KeyModifiers::CONTROL)
    )
}

/// Left button press position, if this is one
pub fn left_click(event: &MouseEvent) -> Option<(u16, u16)> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some((event.column, event.row)),
        _ => None,
    }
}

/// Check for navigation keys (returns delta)
pub fn navigation_delta(event: &KeyEvent) -> Option<i32> {
    match (event.code, event.modifiers) {
        // Arrow keys (primary)
        (KeyCode::Up, KeyModifiers::NONE) => Some(-1),
        (KeyCode::Down, KeyModifiers::NONE) => Some(1),
        (KeyCode::PageUp, KeyModifiers::NONE) => Some(-10),
        (KeyCode::PageDown, KeyModifiers::NONE) => Some(10),
        (KeyCode::Home, KeyModifiers::NONE) => Some(i32::MIN),
        (KeyCode::End, KeyModifiers::NONE) => Some(i32::MAX),

        // Vi-style (alternative)
        (KeyCode::Char('k'), KeyModifiers::NONE) => Some(-1),
        (KeyCode::Char('j'), KeyModifiers::NONE) => Some(1),
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => Some(-10),
        (KeyCode::Char('d'), KeyModifiers::CONTROL) => Some(10),
        (KeyCode::Char('g'), KeyModifiers::NONE) => Some(i32::MIN),
        (KeyCode::Char('G'), KeyModifiers::SHIFT) => Some(i32::MAX),

        _ => None,
    }
}

/// Check for screen number keys (1-4)
pub fn tab_number(event: &KeyEvent) -> Option<usize> {
    match event.code {
        KeyCode::Char('1') => Some(0),
        KeyCode::Char('2') => Some(1),
        KeyCode::Char('3') => Some(2),
        KeyCode::Char('4') => Some(3),
        _ => None,
    }
}
