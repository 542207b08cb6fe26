use crate::shared::storage::{decode_entries, read_json_value, write_json, KeyValueStorage, StorageError};
use contracts::domain::a002_purchase_order::aggregate::{Order, OrderBucket, OrdersStore};
use contracts::domain::common::AggregateRoot;
use serde_json::Value;

/// Прочитать обе корзины заказов.
///
/// Битый JSON или не-объект дают `{pending: [], completed: []}`; элементы
/// неверной формы отбрасываются по одному. Статус заказа определяется корзиной.
pub fn load_store(storage: &dyn KeyValueStorage) -> Result<OrdersStore, StorageError> {
    let key = Order::collection_name();
    let mut root = match read_json_value(storage, key)? {
        Some(Value::Object(map)) => map,
        None | Some(Value::Null) => return Ok(OrdersStore::default()),
        Some(_) => {
            tracing::warn!(key, "Orders are not an object, using empty buckets");
            return Ok(OrdersStore::default());
        }
    };

    Ok(OrdersStore {
        pending: decode_bucket(key, root.remove("pending"), OrderBucket::Pending),
        completed: decode_bucket(key, root.remove("completed"), OrderBucket::Completed),
    })
}

fn decode_bucket(key: &str, value: Option<Value>, bucket: OrderBucket) -> Vec<Order> {
    let mut orders: Vec<Order> = decode_entries(key, value);
    for order in &mut orders {
        order.status = bucket.status();
    }
    orders
}

pub fn save_store(storage: &dyn KeyValueStorage, store: &OrdersStore) -> Result<(), StorageError> {
    write_json(storage, Order::collection_name(), store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use contracts::domain::a002_purchase_order::aggregate::OrderStatus;

    #[test]
    fn test_malformed_orders_become_empty_buckets() {
        for raw in ["{oops", "[1,2,3]", "null"] {
            let storage = MemoryStorage::with_items([("orders", raw)]);
            assert_eq!(load_store(&storage).unwrap(), OrdersStore::default());
        }
    }

    #[test]
    fn test_missing_bucket_is_empty() {
        let storage = MemoryStorage::with_items([(
            "orders",
            r#"{"pending":[{"id":"order-1-a","name":"Milk","price":"250"}, 7]}"#,
        )]);
        let store = load_store(&storage).unwrap();
        assert_eq!(store.pending.len(), 1);
        assert_eq!(store.pending[0].price, Some(250.0));
        assert!(store.completed.is_empty());
    }

    #[test]
    fn test_status_follows_bucket() {
        let storage = MemoryStorage::with_items([(
            "orders",
            r#"{"pending":[{"name":"Paneer","price":300,"status":"Delivered"},{"name":"Rice","price":200,"status":null}],
                "completed":[{"name":"Butter","price":500,"status":"Pending"}]}"#,
        )]);
        let store = load_store(&storage).unwrap();
        assert_eq!(store.pending.len(), 2);
        assert!(store.pending.iter().all(|o| o.status == OrderStatus::Pending));
        assert_eq!(store.completed[0].status, OrderStatus::Completed);
    }
}
