//! UI commands of the chat panel, applied to [`ChatSessions`].

use super::assistant::InventoryAssistant;
use crate::domain::a003_chat_conversation::ChatSessions;
use crate::shared::storage::KeyValueStorage;
use anyhow::Context;
use chrono::{DateTime, Utc};
use contracts::domain::a003_chat_conversation::aggregate::{ChatExport, ConversationId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Текст из поля ввода (или распознанной речи)
    Send(String),
    NewChat,
    ClearChat,
    Select(ConversationId),
    Export,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Replied(String),
    Switched(ConversationId),
    Exported(ChatExport),
    /// Пустое сообщение, неизвестный чат или нечего экспортировать
    Ignored,
}

/// Apply one command and persist the sessions when they changed.
pub fn dispatch(
    storage: &dyn KeyValueStorage,
    sessions: &mut ChatSessions,
    assistant: &InventoryAssistant,
    command: ChatCommand,
    now: DateTime<Utc>,
) -> anyhow::Result<ChatEvent> {
    let event = match command {
        ChatCommand::Send(text) => {
            let text = text.trim();
            if text.is_empty() {
                return Ok(ChatEvent::Ignored);
            }
            sessions.append_message(text, true, now);
            let reply = assistant.process(text);
            sessions.append_message(reply.clone(), false, now);
            ChatEvent::Replied(reply)
        }
        ChatCommand::NewChat => ChatEvent::Switched(sessions.new_chat(now)),
        ChatCommand::ClearChat => ChatEvent::Switched(sessions.clear_current(now)),
        ChatCommand::Select(id) => {
            if !sessions.select(&id) {
                tracing::warn!(id = %id, "Unknown conversation selected");
                return Ok(ChatEvent::Ignored);
            }
            ChatEvent::Switched(id)
        }
        ChatCommand::Export => {
            return Ok(sessions
                .export_current(now)
                .map(ChatEvent::Exported)
                .unwrap_or(ChatEvent::Ignored));
        }
    };

    sessions.save(storage).context("Failed to save chat history")?;
    Ok(event)
}
