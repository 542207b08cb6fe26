use crate::shared::storage::{decode_entries, read_json_value, write_json, KeyValueStorage, StorageError};
use contracts::domain::a001_inventory_item::aggregate::InventoryItem;
use contracts::domain::common::AggregateRoot;

/// Все позиции склада в порядке хранения; битые данные дают пустой список
pub fn load_all(storage: &dyn KeyValueStorage) -> Result<Vec<InventoryItem>, StorageError> {
    let key = InventoryItem::collection_name();
    let value = read_json_value(storage, key)?;
    Ok(decode_entries(key, value))
}

/// Перезаписать массив позиций целиком
pub fn save_all(storage: &dyn KeyValueStorage, items: &[InventoryItem]) -> Result<(), StorageError> {
    write_json(storage, InventoryItem::collection_name(), items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_load_missing_and_malformed() {
        let storage = MemoryStorage::new();
        assert!(load_all(&storage).unwrap().is_empty());

        storage.set_item("inventoryItems", "not json").unwrap();
        assert!(load_all(&storage).unwrap().is_empty());

        storage.set_item("inventoryItems", r#"{"name":"Sprite"}"#).unwrap();
        assert!(load_all(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload_keeps_unknown_fields() {
        let storage = MemoryStorage::with_items([(
            "inventoryItems",
            r#"[{"id":"1","name":"Sprite","quantity":15,"price":120,"createdAt":"2024-03-01"}]"#,
        )]);
        let items = load_all(&storage).unwrap();
        save_all(&storage, &items).unwrap();
        let raw = storage.get_item("inventoryItems").unwrap().unwrap();
        assert!(raw.contains("\"createdAt\":\"2024-03-01\""));
        assert_eq!(load_all(&storage).unwrap(), items);
    }
}
