use crate::shared::storage::{read_json_value, write_json, KeyValueStorage, StorageError};
use contracts::domain::a003_chat_conversation::aggregate::{ChatHistory, Conversation, ConversationId};
use contracts::domain::common::AggregateRoot;
use contracts::shared::storage_keys::LAST_CHAT_ID;
use serde_json::Value;

/// История чатов; битые разговоры (в том числе без ID) отбрасываются по одному
pub fn load_history(storage: &dyn KeyValueStorage) -> Result<ChatHistory, StorageError> {
    let key = Conversation::collection_name();
    let entries = match read_json_value(storage, key)? {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => return Ok(ChatHistory::new()),
        Some(_) => {
            tracing::warn!(key, "Chat history is not an object, starting empty");
            return Ok(ChatHistory::new());
        }
    };

    let mut history = ChatHistory::new();
    for (id, entry) in entries {
        match serde_json::from_value::<Conversation>(entry) {
            Ok(conversation) => {
                history.insert(id, conversation);
            }
            Err(e) => tracing::warn!(key, id, error = %e, "Skipping malformed conversation"),
        }
    }
    Ok(history)
}

/// ID последнего открытого чата (хранится как есть, без JSON)
pub fn load_last_chat_id(storage: &dyn KeyValueStorage) -> Result<Option<ConversationId>, StorageError> {
    Ok(storage
        .get_item(LAST_CHAT_ID)?
        .filter(|id| !id.is_empty())
        .map(ConversationId::new))
}

pub fn save(
    storage: &dyn KeyValueStorage,
    history: &ChatHistory,
    current: Option<&ConversationId>,
) -> Result<(), StorageError> {
    write_json(storage, Conversation::collection_name(), history)?;
    match current {
        Some(id) => storage.set_item(LAST_CHAT_ID, &id.0),
        None => storage.remove_item(LAST_CHAT_ID),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_malformed_history_is_empty() {
        let storage = MemoryStorage::with_items([("chatHistory", "[")]);
        assert!(load_history(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_bad_conversation_skipped() {
        let storage = MemoryStorage::with_items([(
            "chatHistory",
            r#"{"1":{"id":"1","title":"Hi","timestamp":"2024-03-15T10:00:00.000Z","messages":[]},"2":{"title":5},"3":{"id":"","title":"Blank"}}"#,
        )]);
        let history = load_history(&storage).unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history["1"].title, "Hi");
        assert!(history.values().all(|c| !c.id.0.is_empty()));
    }

    #[test]
    fn test_last_chat_id_raw_string() {
        let storage = MemoryStorage::with_items([("lastChatId", "1710496946000")]);
        assert_eq!(
            load_last_chat_id(&storage).unwrap(),
            Some(ConversationId::new("1710496946000"))
        );
    }
}
