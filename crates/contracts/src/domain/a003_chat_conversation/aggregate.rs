use crate::domain::common::lenient::{de_required_string, de_string};
use crate::domain::common::AggregateRoot;
use crate::string_aggregate_id;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Максимальная длина заголовка чата до многоточия
pub const TITLE_MAX_CHARS: usize = 30;

/// Заголовок нового чата до первого сообщения пользователя
pub const DEFAULT_TITLE: &str = "New Chat";

/// ID чата: миллисекунды эпохи момента создания
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConversationId(pub String);

impl ConversationId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn from_timestamp(now: DateTime<Utc>) -> Self {
        Self(now.timestamp_millis().to_string())
    }
}

string_aggregate_id!(ConversationId);

/// Сообщение чата ассистента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    #[serde(default, deserialize_with = "de_string")]
    pub content: String,
    #[serde(default)]
    pub is_user: bool,
    #[serde(default, deserialize_with = "de_string")]
    pub timestamp: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            is_user: true,
            timestamp: iso_timestamp(now),
        }
    }

    pub fn assistant(content: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            content: content.into(),
            is_user: false,
            timestamp: iso_timestamp(now),
        }
    }

    /// Строка экспорта: `You: ...` или `AI: ...`
    pub fn export_line(&self) -> String {
        let author = if self.is_user { "You" } else { "AI" };
        format!("{}: {}", author, self.content)
    }
}

/// Разговор с ассистентом (агрегат a003)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    /// Без ID разговор недостижим из боковой панели, такая запись отбрасывается
    #[serde(deserialize_with = "de_conversation_id")]
    pub id: ConversationId,
    #[serde(default, deserialize_with = "de_string")]
    pub title: String,
    #[serde(default, deserialize_with = "de_string")]
    pub timestamp: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new(id: ConversationId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: DEFAULT_TITLE.to_string(),
            timestamp: iso_timestamp(now),
            messages: Vec::new(),
        }
    }

    /// Добавить сообщение; первое сообщение пользователя задаёт заголовок
    pub fn push_message(&mut self, message: ChatMessage) {
        let first_user_message = message.is_user && !self.messages.iter().any(|m| m.is_user);
        if first_user_message {
            self.title = title_from_message(&message.content);
        }
        self.messages.push(message);
    }

    /// Текст экспорта: сообщения через пустую строку
    pub fn export_text(&self) -> String {
        self.messages
            .iter()
            .map(ChatMessage::export_line)
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// Момент создания; `None`, если в хранилище записано что-то непарсируемое
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

impl AggregateRoot for Conversation {
    fn collection_name() -> &'static str {
        "chatHistory"
    }
}

fn de_conversation_id<'de, D>(deserializer: D) -> Result<ConversationId, D::Error>
where
    D: Deserializer<'de>,
{
    de_required_string(deserializer).map(ConversationId)
}

/// Содержимое ключа `chatHistory`: ID чата → разговор
pub type ChatHistory = BTreeMap<String, Conversation>;

/// Готовый к скачиванию экспорт чата
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatExport {
    pub filename: String,
    pub content: String,
}

impl ChatExport {
    pub fn new(conversation: &Conversation, now: DateTime<Utc>) -> Self {
        Self {
            filename: format!("chat-export-{}.txt", now.format("%Y-%m-%d")),
            content: conversation.export_text(),
        }
    }
}

/// Первые 30 символов сообщения, с многоточием для длинных
pub fn title_from_message(content: &str) -> String {
    let mut title: String = content.chars().take(TITLE_MAX_CHARS).collect();
    if content.chars().count() > TITLE_MAX_CHARS {
        title.push_str("...");
    }
    title
}

/// ISO 8601 с миллисекундами и суффиксом `Z`
pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}
