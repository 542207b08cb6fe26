use super::repository;
use crate::shared::confirmation::Confirmation;
use crate::shared::date_utils::parse_date;
use crate::shared::storage::KeyValueStorage;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use contracts::dashboards::d400_inventory_analytics::OrdersOverview;
use contracts::domain::a002_purchase_order::aggregate::{
    NewOrder, Order, OrderBucket, OrderId, OrderStatus, OrdersStore,
};
use contracts::domain::a003_chat_conversation::aggregate::iso_timestamp;

/// Создать заказ в корзине pending
pub fn create(storage: &dyn KeyValueStorage, dto: NewOrder, now: DateTime<Utc>) -> anyhow::Result<OrderId> {
    let mut store = repository::load_store(storage)?;

    let order = Order {
        id: OrderId::generate(now),
        name: dto.name.trim().to_string(),
        category: dto.category,
        quantity: dto.quantity,
        unit: dto.unit,
        price: Some(dto.price),
        supplier: dto.supplier.filter(|s| !s.is_empty()),
        delivery_date: dto.delivery_date.filter(|d| !d.is_empty()),
        order_date: Some(iso_timestamp(now)),
        notes: dto.notes.filter(|n| !n.is_empty()),
        status: OrderStatus::Pending,
        completion_date: None,
        extra: Default::default(),
    };
    order.validate().map_err(|e| anyhow::anyhow!(e))?;

    let id = order.id.clone();
    store.pending.push(order);
    repository::save_store(storage, &store).context("Failed to save orders")?;
    tracing::info!(id = %id, "Order created");
    Ok(id)
}

/// Перенести заказ из pending в конец completed. `Ok(false)`, если в pending его нет
pub fn complete(storage: &dyn KeyValueStorage, id: &OrderId, now: DateTime<Utc>) -> anyhow::Result<bool> {
    let mut store = repository::load_store(storage)?;
    let Some(index) = store.pending.iter().position(|o| &o.id == id) else {
        tracing::warn!(id = %id, "Pending order not found");
        return Ok(false);
    };

    let mut order = store.pending.remove(index);
    order.status = OrderStatus::Completed;
    order.completion_date = Some(iso_timestamp(now));
    store.completed.push(order);

    repository::save_store(storage, &store).context("Failed to save orders")?;
    tracing::info!(id = %id, "Order completed");
    Ok(true)
}

/// Отредактировать заказ в той корзине, где он лежит; статус и даты жизненного цикла не меняются
pub fn update(storage: &dyn KeyValueStorage, order: Order) -> anyhow::Result<()> {
    order.validate().map_err(|e| anyhow::anyhow!(e))?;
    let mut store = repository::load_store(storage)?;
    let (bucket, index) = store
        .locate(&order.id)
        .ok_or_else(|| anyhow::anyhow!("Order not found: {}", order.id))?;

    let existing = &mut store.bucket_mut(bucket)[index];
    let mut extra = std::mem::take(&mut existing.extra);
    extra.extend(order.extra.clone());
    *existing = Order {
        status: existing.status,
        order_date: existing.order_date.take(),
        completion_date: existing.completion_date.take(),
        extra,
        ..order
    };

    repository::save_store(storage, &store).context("Failed to save orders")?;
    Ok(())
}

/// Удалить заказ из корзины после подтверждения
pub fn remove(
    storage: &dyn KeyValueStorage,
    id: &OrderId,
    bucket: OrderBucket,
    confirmation: Confirmation,
) -> anyhow::Result<bool> {
    if !confirmation.is_confirmed() {
        return Ok(false);
    }
    let mut store = repository::load_store(storage)?;
    let orders = store.bucket_mut(bucket);
    let before = orders.len();
    orders.retain(|o| &o.id != id);
    if orders.len() == before {
        tracing::warn!(id = %id, bucket = bucket.label(), "Order to remove not found");
        return Ok(false);
    }
    repository::save_store(storage, &store).context("Failed to save orders")?;
    Ok(true)
}

/// Карточки страницы заказов
pub fn overview(store: &OrdersStore, today: NaiveDate) -> OrdersOverview {
    let scheduled_orders = store
        .pending
        .iter()
        .filter(|o| {
            o.delivery_date
                .as_deref()
                .and_then(parse_date)
                .is_some_and(|d| d > today)
        })
        .count();

    OrdersOverview {
        total_orders: store.len(),
        pending_orders: store.pending.len(),
        scheduled_orders,
        total_spent: store
            .pending
            .iter()
            .chain(store.completed.iter())
            .map(Order::price_value)
            .sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;
    use crate::shared::test_support::{date, instant};

    fn new_order(name: &str, price: f64, delivery: &str) -> NewOrder {
        NewOrder {
            name: name.into(),
            category: "Dairy".into(),
            quantity: 4.0,
            unit: "l".into(),
            price,
            delivery_date: Some(delivery.into()),
            supplier: Some("Amul".into()),
            notes: None,
        }
    }

    #[test]
    fn test_create_and_complete_keeps_count() {
        let storage = MemoryStorage::new();
        let now = instant(2024, 3, 15, 10);
        let first = create(&storage, new_order("Milk", 500.0, "2024-03-18"), now).unwrap();
        create(&storage, new_order("Curd", 300.0, "2024-03-20"), now).unwrap();

        let before = repository::load_store(&storage).unwrap();
        assert_eq!(before.pending.len(), 2);
        assert_eq!(before.pending[0].completion_date, None);

        assert!(complete(&storage, &first, instant(2024, 3, 18, 9)).unwrap());
        let after = repository::load_store(&storage).unwrap();
        assert_eq!(after.len(), before.len());
        assert_eq!(after.pending.len(), 1);
        let done = after.completed.last().unwrap();
        assert_eq!(done.id, first);
        assert_eq!(done.status, OrderStatus::Completed);
        assert_eq!(done.completion_date.as_deref(), Some("2024-03-18T09:00:00.000Z"));

        assert!(!complete(&storage, &first, now).unwrap());
    }

    #[test]
    fn test_completion_date_serialized_as_null() {
        let storage = MemoryStorage::new();
        create(&storage, new_order("Milk", 500.0, "2024-03-18"), instant(2024, 3, 15, 10)).unwrap();
        let raw = storage.get_item("orders").unwrap().unwrap();
        assert!(raw.contains("\"completionDate\":null"));
        assert!(raw.contains("\"status\":\"Pending\""));
    }

    #[test]
    fn test_update_in_completed_bucket() {
        let storage = MemoryStorage::new();
        let now = instant(2024, 3, 15, 10);
        let id = create(&storage, new_order("Milk", 500.0, "2024-03-18"), now).unwrap();
        complete(&storage, &id, now).unwrap();

        let mut edited = repository::load_store(&storage).unwrap().completed.remove(0);
        edited.price = Some(450.0);
        edited.status = OrderStatus::Pending;
        update(&storage, edited).unwrap();

        let store = repository::load_store(&storage).unwrap();
        assert_eq!(store.completed[0].price, Some(450.0));
        assert_eq!(store.completed[0].status, OrderStatus::Completed);
    }

    #[test]
    fn test_remove_declined_keeps_order() {
        let storage = MemoryStorage::new();
        let id = create(&storage, new_order("Milk", 500.0, "2024-03-18"), instant(2024, 3, 15, 10)).unwrap();
        assert!(!remove(&storage, &id, OrderBucket::Pending, Confirmation::Declined).unwrap());
        assert!(!remove(&storage, &id, OrderBucket::Completed, Confirmation::Confirmed).unwrap());
        assert!(remove(&storage, &id, OrderBucket::Pending, Confirmation::Confirmed).unwrap());
        assert!(repository::load_store(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_overview() {
        let storage = MemoryStorage::new();
        let now = instant(2024, 3, 15, 10);
        create(&storage, new_order("Milk", 500.0, "2024-03-18"), now).unwrap();
        create(&storage, new_order("Curd", 300.0, "2024-03-15"), now).unwrap();
        let store = repository::load_store(&storage).unwrap();

        let overview = overview(&store, date(2024, 3, 15));
        assert_eq!(overview.total_orders, 2);
        assert_eq!(overview.pending_orders, 2);
        assert_eq!(overview.scheduled_orders, 1);
        assert_eq!(overview.total_spent, 800.0);
    }
}
