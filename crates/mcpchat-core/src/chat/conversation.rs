//! Append-only conversation history

use crate::types::ChatMessage;

/// Ordered message history for one query, or for the whole session
///
/// Messages are only ever appended; nothing already pushed is changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_user_text(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::user(text));
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentBlock, MessageRole, ToolResultContent};
    use serde_json::json;

    #[test]
    fn test_append_order() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());

        conversation.push_user_text("take a screenshot");
        conversation.push(ChatMessage::assistant(vec![ContentBlock::tool_use(
            "toolu_1",
            "screenshot",
            json!({}),
        )]));

        conversation.push(ChatMessage::tool_results(vec![ContentBlock::tool_result(
            "toolu_1",
            vec![ToolResultContent::text("ok")],
        )]));

        assert_eq!(conversation.len(), 3);
        let roles: Vec<_> = conversation.messages().iter().map(|m| m.role).collect();
        assert_eq!(roles, vec![MessageRole::User, MessageRole::Assistant, MessageRole::User]);
        assert_eq!(conversation.last().unwrap().tool_result_ids(), vec!["toolu_1"]);
    }
}
