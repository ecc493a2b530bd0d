//! Chat assistant stub.
//!
//! Keeps a transcript and an input buffer. Sending a message appends it and
//! a canned reply; no network call is made even when an API key is
//! configured, the integration point is intentionally left unwired.

use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

const STUB_REPLY: &str =
    "Assistant integration requires an API key. Please add your API key in settings.";

#[derive(Debug, Default)]
pub struct AssistantState {
    pub messages: Vec<ChatMessage>,
    pub input_buffer: String,
}

impl AssistantState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the user message and the canned assistant reply. Empty input
    /// is ignored.
    pub fn send(&mut self, api_key_configured: bool) {
        let message = self.input_buffer.trim().to_string();
        if message.is_empty() {
            return;
        }
        self.input_buffer.clear();

        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: message,
        });
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: STUB_REPLY.to_string(),
        });

        if api_key_configured {
            info!("assistant request skipped: transport not wired despite configured key");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_appends_user_message_and_canned_reply() {
        let mut assistant = AssistantState::new();
        assistant.input_buffer = "summarize my notes".to_string();
        assistant.send(false);

        assert_eq!(assistant.messages.len(), 2);
        assert_eq!(assistant.messages[0].role, ChatRole::User);
        assert_eq!(assistant.messages[0].content, "summarize my notes");
        assert_eq!(assistant.messages[1].role, ChatRole::Assistant);
        assert!(assistant.messages[1].content.contains("API key"));
        assert!(assistant.input_buffer.is_empty());
    }

    #[test]
    fn empty_input_is_ignored() {
        let mut assistant = AssistantState::new();
        assistant.input_buffer = "   ".to_string();
        assistant.send(true);
        assert!(assistant.messages.is_empty());
    }
}
