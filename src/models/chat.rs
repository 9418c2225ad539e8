use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const WELCOME_MESSAGE: &str = "Describe your team system philosophy, desired pace, style \
(e.g., 5-out, motion, heavy PnR), and the player archetype you want to recruit. I will \
translate that into target metric profiles and candidate filters.";

pub const MOCK_REPLY: &str = "Mock analysis: Focus on high rim pressure (FGA/100 > 18), strong \
AST/FGA synergy (>.55) and positive defensive rebounding (DREB% > 18). Consider wings with \
versatile usage (22-24% USG) and above benchmark TS%.";

pub const THINKING: &str = "Thinking...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

impl ChatRole {
    pub fn label(&self) -> &'static str {
        match self {
            Self::User => "You",
            Self::Assistant | Self::System => "IQ Assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            sent_at: Local::now(),
        }
    }

    pub fn welcome() -> Self {
        Self::new(ChatRole::Assistant, WELCOME_MESSAGE)
    }
}

/// Conversation with the recruiting assistant
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    pending: bool,
}

impl Default for ChatLog {
    fn default() -> Self {
        Self {
            messages: vec![ChatMessage::welcome()],
            pending: false,
        }
    }
}

impl ChatLog {
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Record a user message. Blank input or a pending reply rejects it.
    pub fn submit(&mut self, input: &str) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() || self.pending {
            return None;
        }
        self.messages.push(ChatMessage::new(ChatRole::User, text));
        self.pending = true;
        self.messages.last()
    }

    pub fn reply(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::Assistant, content));
        self.pending = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_welcome() {
        let log = ChatLog::default();
        assert_eq!(log.messages().len(), 1);
        assert_eq!(log.messages()[0].role, ChatRole::Assistant);
        assert!(!log.is_pending());
    }

    #[test]
    fn blank_and_pending_submissions_are_ignored() {
        let mut log = ChatLog::default();
        assert!(log.submit("   ").is_none());
        assert_eq!(log.submit("  fast pace  ").map(|m| m.content.clone()), Some("fast pace".into()));
        assert!(log.is_pending());
        assert!(log.submit("again").is_none());

        log.reply(MOCK_REPLY);
        assert!(!log.is_pending());
        assert_eq!(log.messages().len(), 3);
        assert_eq!(log.messages()[2].role.label(), "IQ Assistant");
    }
}
