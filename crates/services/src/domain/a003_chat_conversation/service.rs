use super::repository;
use crate::shared::storage::{KeyValueStorage, StorageError};
use chrono::{DateTime, Utc};
use contracts::domain::a003_chat_conversation::aggregate::{
    ChatExport, ChatHistory, ChatMessage, Conversation, ConversationId,
};

/// Состояние чатов ассистента: история, текущий разговор и приветствие.
///
/// Владеет копией истории; [`ChatSessions::save`] переписывает её в хранилище целиком.
#[derive(Debug, Clone)]
pub struct ChatSessions {
    history: ChatHistory,
    current_id: Option<ConversationId>,
    greeting: String,
}

impl ChatSessions {
    /// Пустая история (хранилище недоступно или ещё не читалось)
    pub fn new(greeting: impl Into<String>) -> Self {
        Self {
            history: ChatHistory::new(),
            current_id: None,
            greeting: greeting.into(),
        }
    }

    pub fn load(storage: &dyn KeyValueStorage, greeting: impl Into<String>) -> Result<Self, StorageError> {
        Ok(Self {
            history: repository::load_history(storage)?,
            current_id: repository::load_last_chat_id(storage)?,
            greeting: greeting.into(),
        })
    }

    /// Открыть последний чат, если он сохранился, иначе начать новый
    pub fn initialize(&mut self, now: DateTime<Utc>) -> ConversationId {
        match &self.current_id {
            Some(id) if self.history.contains_key(&id.0) => id.clone(),
            _ => self.new_chat(now),
        }
    }

    /// Новый чат с приветствием ассистента; становится текущим
    pub fn new_chat(&mut self, now: DateTime<Utc>) -> ConversationId {
        let mut millis = now.timestamp_millis();
        while self.history.contains_key(&millis.to_string()) {
            millis += 1;
        }
        let id = ConversationId::new(millis.to_string());

        let mut conversation = Conversation::new(id.clone(), now);
        conversation.push_message(ChatMessage::assistant(self.greeting.clone(), now));
        self.history.insert(id.0.clone(), conversation);
        self.current_id = Some(id.clone());

        tracing::debug!(id = %id, "New chat started");
        id
    }

    /// Очистка чата: начинается новый, старый остаётся в истории
    pub fn clear_current(&mut self, now: DateTime<Utc>) -> ConversationId {
        self.new_chat(now)
    }

    pub fn select(&mut self, id: &ConversationId) -> bool {
        if self.history.contains_key(&id.0) {
            self.current_id = Some(id.clone());
            true
        } else {
            false
        }
    }

    pub fn current_id(&self) -> Option<&ConversationId> {
        self.current_id.as_ref()
    }

    pub fn current(&self) -> Option<&Conversation> {
        self.current_id
            .as_ref()
            .and_then(|id| self.history.get(&id.0))
    }

    /// Добавить сообщение в текущий чат (создаётся, если его нет)
    pub fn append_message(&mut self, content: impl Into<String>, is_user: bool, now: DateTime<Utc>) {
        let id = match self.current() {
            Some(conversation) => conversation.id.clone(),
            None => self.new_chat(now),
        };
        let message = if is_user {
            ChatMessage::user(content, now)
        } else {
            ChatMessage::assistant(content, now)
        };
        if let Some(conversation) = self.history.get_mut(&id.0) {
            conversation.push_message(message);
        }
    }

    /// Разговоры для боковой панели: новые сверху
    pub fn sidebar(&self) -> Vec<&Conversation> {
        let mut conversations: Vec<&Conversation> = self.history.values().collect();
        conversations.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id.cmp(&a.id))
        });
        conversations
    }

    pub fn history(&self) -> &ChatHistory {
        &self.history
    }

    pub fn save(&self, storage: &dyn KeyValueStorage) -> Result<(), StorageError> {
        repository::save(storage, &self.history, self.current_id.as_ref())
    }

    pub fn export_current(&self, now: DateTime<Utc>) -> Option<ChatExport> {
        self.current().map(|conversation| ChatExport::new(conversation, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use crate::shared::test_support::instant;

    const GREETING: &str = "Hello!";

    #[test]
    fn test_initialize_creates_chat_with_greeting() {
        let storage = MemoryStorage::new();
        let mut sessions = ChatSessions::load(&storage, GREETING).unwrap();
        let now = instant(2024, 3, 15, 10);
        let id = sessions.initialize(now);

        assert_eq!(id.0, now.timestamp_millis().to_string());
        let current = sessions.current().unwrap();
        assert_eq!(current.title, "New Chat");
        assert_eq!(current.messages.len(), 1);
        assert!(!current.messages[0].is_user);
        assert_eq!(current.messages[0].content, GREETING);
    }

    #[test]
    fn test_initialize_reopens_last_chat() {
        let storage = MemoryStorage::new();
        let mut sessions = ChatSessions::load(&storage, GREETING).unwrap();
        let first = sessions.initialize(instant(2024, 3, 15, 10));
        sessions.save(&storage).unwrap();

        let mut reloaded = ChatSessions::load(&storage, GREETING).unwrap();
        assert_eq!(reloaded.initialize(instant(2024, 3, 16, 10)), first);
    }

    #[test]
    fn test_new_starts_without_current_chat() {
        let mut sessions = ChatSessions::new(GREETING);
        assert!(sessions.current().is_none());
        assert!(sessions.sidebar().is_empty());

        sessions.initialize(instant(2024, 3, 15, 10));
        assert_eq!(sessions.sidebar().len(), 1);
    }

    #[test]
    fn test_new_chat_ids_are_unique() {
        let mut sessions = ChatSessions::load(&MemoryStorage::new(), GREETING).unwrap();
        let now = instant(2024, 3, 15, 10);
        let a = sessions.new_chat(now);
        let b = sessions.clear_current(now);
        assert_ne!(a, b);
        assert_eq!(sessions.current_id(), Some(&b));
        assert_eq!(sessions.history().len(), 2);
        assert!(sessions.select(&a));
        assert!(!sessions.select(&ConversationId::new("nope")));
    }

    #[test]
    fn test_round_trip_preserves_messages() {
        let storage = MemoryStorage::new();
        let mut sessions = ChatSessions::load(&storage, GREETING).unwrap();
        let now = instant(2024, 3, 15, 10);
        sessions.initialize(now);
        sessions.append_message("How many sprite do we have?", true, now);
        sessions.append_message("There are 15 units of Sprite in stock.", false, now);
        sessions.save(&storage).unwrap();

        let reloaded = ChatSessions::load(&storage, GREETING).unwrap();
        let before = sessions.current().unwrap();
        let after = reloaded.current().unwrap();
        assert_eq!(after.messages, before.messages);
        assert_eq!(after.title, "How many sprite do we have?");
        let flags: Vec<bool> = after.messages.iter().map(|m| m.is_user).collect();
        assert_eq!(flags, vec![false, true, false]);
    }

    #[test]
    fn test_sidebar_newest_first() {
        let mut sessions = ChatSessions::load(&MemoryStorage::new(), GREETING).unwrap();
        sessions.new_chat(instant(2024, 3, 14, 10));
        let newest = sessions.new_chat(instant(2024, 3, 16, 10));
        sessions.new_chat(instant(2024, 3, 15, 10));
        assert_eq!(sessions.sidebar()[0].id, newest);
    }

    #[test]
    fn test_export_current() {
        let mut sessions = ChatSessions::load(&MemoryStorage::new(), GREETING).unwrap();
        let now = instant(2024, 3, 15, 10);
        assert!(sessions.export_current(now).is_none());
        sessions.append_message("hi", true, now);
        let export = sessions.export_current(now).unwrap();
        assert_eq!(export.filename, "chat-export-2024-03-15.txt");
        assert_eq!(export.content, "AI: Hello!\n\nYou: hi");
    }
}
