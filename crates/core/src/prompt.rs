//! Prompt payloads and the formatting strategies that build them.
//!
//! The assembler decides *what* goes into a request (context passage,
//! history window, instruction). A [`PromptFormat`] supplied by the backend
//! decides *how* those sections are shaped on the wire: one flat text or a
//! list of role-tagged messages.

use serde::{Deserialize, Serialize};

use crate::message::{Role, Turn, serialize_turns};

pub const CONTEXT_HEADER: &str = "### SYSTEM CONTEXT ###";
pub const HISTORY_HEADER: &str = "### CONVERSATION HISTORY ###";

/// The opaque request body handed to a backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "body", rename_all = "snake_case")]
pub enum PromptPayload {
    /// A single flat prompt string.
    Text(String),
    /// A structured, role-tagged message list.
    Messages(Vec<ChatMessage>),
}

impl PromptPayload {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Messages(_) => None,
        }
    }

    pub fn as_messages(&self) -> Option<&[ChatMessage]> {
        match self {
            Self::Text(_) => None,
            Self::Messages(messages) => Some(messages),
        }
    }
}

/// One entry of a message-list payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Everything that goes into one generation request, already windowed.
#[derive(Debug, Clone, Copy)]
pub struct PromptSections<'a> {
    /// The retrieved domain passage for this turn.
    pub context_passage: &'a str,
    /// History turns to show the model; the current user turn is last.
    pub turns: &'a [Turn],
    /// Trailing instruction appended after the history.
    pub instruction: &'a str,
}

/// A backend-supplied strategy that shapes prompt sections into a payload.
pub trait PromptFormat: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn render(&self, sections: &PromptSections<'_>) -> PromptPayload;
}

/// Single-string template:
///
/// ```text
/// ### SYSTEM CONTEXT ###
/// <context passage>
///
/// ### CONVERSATION HISTORY ###
/// <role: content lines>
///
/// <instruction>
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTemplate;

impl PromptFormat for FlatTemplate {
    fn name(&self) -> &'static str {
        "flat"
    }

    fn render(&self, sections: &PromptSections<'_>) -> PromptPayload {
        let mut prompt = String::new();
        prompt.push_str(CONTEXT_HEADER);
        prompt.push('\n');
        prompt.push_str(sections.context_passage.trim());
        prompt.push_str("\n\n");
        prompt.push_str(HISTORY_HEADER);
        prompt.push('\n');
        prompt.push_str(&serialize_turns(sections.turns));
        prompt.push_str("\n\n");
        prompt.push_str(sections.instruction.trim());
        PromptPayload::Text(prompt)
    }
}

/// Role-tagged message list.
///
/// System turns are folded into one leading system message together with
/// the context section and the instruction; every other turn becomes its
/// own message in history order.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageList;

impl PromptFormat for MessageList {
    fn name(&self) -> &'static str {
        "messages"
    }

    fn render(&self, sections: &PromptSections<'_>) -> PromptPayload {
        let mut system = sections
            .turns
            .iter()
            .filter(|t| t.role() == Role::System)
            .map(|t| t.content().trim())
            .collect::<Vec<_>>()
            .join("\n\n");

        if !system.is_empty() {
            system.push_str("\n\n");
        }
        system.push_str(CONTEXT_HEADER);
        system.push('\n');
        system.push_str(sections.context_passage.trim());
        system.push_str("\n\n");
        system.push_str(sections.instruction.trim());

        let mut messages = vec![ChatMessage::new(Role::System, system)];
        messages.extend(
            sections
                .turns
                .iter()
                .filter(|t| t.role() != Role::System)
                .map(|t| ChatMessage::new(t.role(), t.content())),
        );
        PromptPayload::Messages(messages)
    }
}
