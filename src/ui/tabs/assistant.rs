//! Assistant tab: chat with the recruiting assistant

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc;

use crate::app::state::{AppMessage, AppState};
use crate::config::KeyBindings;
use crate::models::chat::THINKING;
use crate::models::{ChatMessage, ChatRole};
use crate::ui::layout::ChatLayout;
use crate::ui::theme::Theme;
use crate::ui::widgets::searchbar::SearchBar;

/// Greedy word wrap; words longer than `width` are split
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if len > 0 {
                    lines.push(std::mem::take(&mut current));
                    len = 0;
                }
                let rest = word.split_off(width);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            let extra = if len == 0 { word.len() } else { word.len() + 1 };
            if len + extra > width {
                lines.push(std::mem::take(&mut current));
                len = 0;
            }
            if len > 0 {
                current.push(' ');
                len += 1;
            }
            current.extend(word.iter());
            len += word.len();
        }
        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

pub struct AssistantTab {
    input: SearchBar,
    messages: Vec<ChatMessage>,
    pending: bool,
    revision: Option<u64>,
}

impl AssistantTab {
    pub fn new() -> Self {
        Self {
            input: SearchBar::new(),
            messages: Vec::new(),
            pending: false,
            revision: None,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.input.active
    }

    /// Update cached data from state (call before render)
    pub async fn update_cache(&mut self, state: &Arc<AppState>) {
        let chat = state.chat.read().await;
        if self.revision == Some(chat.revision) {
            return;
        }
        self.revision = Some(chat.revision);
        self.messages = chat.log.messages().to_vec();
        self.pending = chat.log.is_pending();
    }

    fn message_lines(&self, width: usize, theme: &Theme) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        for message in &self.messages {
            let role_style = match message.role {
                ChatRole::User => theme.accent(),
                _ => theme.highlight(),
            };
            lines.push(Line::from(vec![
                Span::styled(message.role.label().to_string(), role_style),
                Span::styled(format!("  {}", message.sent_at.format("%H:%M")), theme.dim()),
            ]));
            lines.extend(
                wrap_text(&message.content, width)
                    .into_iter()
                    .map(|l| Line::from(Span::styled(l, theme.normal()))),
            );
            lines.push(Line::raw(""));
        }
        if self.pending {
            lines.push(Line::from(Span::styled(
                THINKING,
                theme.dim().add_modifier(Modifier::ITALIC),
            )));
        }
        lines
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        let layout = ChatLayout::new(area);

        frame.render_widget(
            Paragraph::new("Describe your system and get targeted portal recommendations.").style(theme.dim()),
            layout.subtitle,
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border())
            .title(Span::styled(" IQ Assistant ", theme.accent()));
        let inner = block.inner(layout.log);
        frame.render_widget(block, layout.log);

        // Keep the newest messages in view
        let lines = self.message_lines(usize::from(inner.width), theme);
        let skip = lines.len().saturating_sub(usize::from(inner.height));
        frame.render_widget(Paragraph::new(lines.into_iter().skip(skip).collect::<Vec<_>>()), inner);

        let title = if self.pending {
            " Waiting for reply... "
        } else if self.input.active {
            " Message (Enter to send, Esc to stop typing) "
        } else {
            " Message (i to type) "
        };
        let input_style = if self.input.active { theme.border_focused() } else { theme.border() };
        let input = Paragraph::new(self.input.query.clone()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(input_style)
                .title(title),
        );
        frame.render_widget(input, layout.input);
        if self.input.active {
            frame.set_cursor_position((
                layout.input.x + 1 + self.input.cursor_pos as u16,
                layout.input.y + 1,
            ));
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent, keys: &KeyBindings, state_tx: &mpsc::Sender<AppMessage>) -> bool {
        if !self.input.active {
            if keys.compose.matches_event(&key) {
                self.input.activate();
                return true;
            }
            return false;
        }

        if keys.send.matches_event(&key) {
            if self.pending || self.input.query.trim().is_empty() {
                return true;
            }
            let text = std::mem::take(&mut self.input.query);
            self.input.clear();
            if let Err(e) = state_tx.send(AppMessage::SendChat(text)).await {
                tracing::error!("Failed to send chat message: {}", e);
            }
            return true;
        }

        if key.code == KeyCode::Esc {
            self.input.deactivate();
        } else {
            self.input.edit(&key);
        }
        true
    }
}

impl Default for AssistantTab {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(wrap_text("fast pace and rim pressure", 10), vec!["fast pace", "and rim", "pressure"]);
        assert_eq!(wrap_text("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[tokio::test]
    async fn compose_and_send() {
        let keys = KeyBindings::default();
        let (tx, mut rx) = mpsc::channel(4);
        let mut tab = AssistantTab::new();

        assert!(!tab.handle_key(press(KeyCode::Char('x')), &keys, &tx).await);
        assert!(tab.handle_key(press(KeyCode::Char('i')), &keys, &tx).await);
        assert!(tab.is_editing());

        // Blank input is not sent
        tab.handle_key(press(KeyCode::Enter), &keys, &tx).await;
        assert!(rx.try_recv().is_err());

        for c in "run and gun".chars() {
            tab.handle_key(press(KeyCode::Char(c)), &keys, &tx).await;
        }
        tab.handle_key(press(KeyCode::Enter), &keys, &tx).await;
        match rx.try_recv() {
            Ok(AppMessage::SendChat(text)) => assert_eq!(text, "run and gun"),
            other => panic!("unexpected message: {:?}", other),
        }
        assert!(tab.input.query.is_empty());
    }

    #[tokio::test]
    async fn pending_reply_blocks_sending() {
        let keys = KeyBindings::default();
        let (tx, mut rx) = mpsc::channel(4);
        let mut tab = AssistantTab::new();
        tab.pending = true;
        tab.handle_key(press(KeyCode::Char('i')), &keys, &tx).await;
        tab.handle_key(press(KeyCode::Char('a')), &keys, &tx).await;
        tab.handle_key(press(KeyCode::Enter), &keys, &tx).await;
        assert!(rx.try_recv().is_err());
        assert_eq!(tab.input.query, "a");
    }
}
