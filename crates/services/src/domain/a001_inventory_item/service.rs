use super::repository;
use crate::shared::config::InventoryConfig;
use crate::shared::confirmation::Confirmation;
use crate::shared::date_utils::days_until;
use crate::shared::storage::KeyValueStorage;
use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use contracts::dashboards::d400_inventory_analytics::{
    CategoryValue, ExpiryBuckets, ExpiryTracker, ExpiryTrackerRow,
};
use contracts::domain::a001_inventory_item::aggregate::{
    ExpiryFilter, ExpiryStatus, InventoryItem, InventoryItemId, NewInventoryItem, StockStatus,
};

/// Остаток не выше этого значения считается критическим
const CRITICAL_STOCK: f64 = 5.0;

pub fn list(storage: &dyn KeyValueStorage) -> anyhow::Result<Vec<InventoryItem>> {
    Ok(repository::load_all(storage)?)
}

/// Добавить позицию; ID — миллисекунды эпохи (увеличивается при коллизии)
pub fn add(
    storage: &dyn KeyValueStorage,
    dto: NewInventoryItem,
    now: DateTime<Utc>,
) -> anyhow::Result<InventoryItemId> {
    let mut items = repository::load_all(storage)?;

    let mut millis = now.timestamp_millis();
    while items.iter().any(|i| i.id.0 == millis.to_string()) {
        millis += 1;
    }
    let id = InventoryItemId::new(millis.to_string());

    let item = InventoryItem {
        id: id.clone(),
        name: dto.name.trim().to_string(),
        category: dto.category,
        quantity: dto.quantity,
        unit: dto.unit,
        price: dto.price,
        expiry_date: dto.expiry_date.filter(|d| !d.is_empty()),
        supplier: dto.supplier.filter(|s| !s.is_empty()),
        notes: dto.notes.filter(|n| !n.is_empty()),
        extra: Default::default(),
    };
    item.validate().map_err(|e| anyhow::anyhow!(e))?;

    items.push(item);
    repository::save_all(storage, &items).context("Failed to save inventory")?;
    tracing::info!(id = %id, "Inventory item added");
    Ok(id)
}

/// Заменить позицию с тем же ID; неизвестные поля старой записи сохраняются
pub fn update(storage: &dyn KeyValueStorage, item: InventoryItem) -> anyhow::Result<()> {
    item.validate().map_err(|e| anyhow::anyhow!(e))?;
    let mut items = repository::load_all(storage)?;
    let existing = items
        .iter_mut()
        .find(|i| i.id == item.id)
        .ok_or_else(|| anyhow::anyhow!("Inventory item not found: {}", item.id))?;

    let mut extra = std::mem::take(&mut existing.extra);
    extra.extend(item.extra.clone());
    *existing = InventoryItem { extra, ..item };

    repository::save_all(storage, &items).context("Failed to save inventory")?;
    Ok(())
}

/// Удалить позицию после подтверждения. `Ok(false)`: отказ или нет такой позиции
pub fn remove(
    storage: &dyn KeyValueStorage,
    id: &InventoryItemId,
    confirmation: Confirmation,
) -> anyhow::Result<bool> {
    if !confirmation.is_confirmed() {
        tracing::debug!(id = %id, "Removal declined");
        return Ok(false);
    }
    let mut items = repository::load_all(storage)?;
    let before = items.len();
    items.retain(|i| &i.id != id);
    if items.len() == before {
        tracing::warn!(id = %id, "Inventory item to remove not found");
        return Ok(false);
    }
    repository::save_all(storage, &items).context("Failed to save inventory")?;
    Ok(true)
}

/// Списать позицию как использованную (действие трекера сроков)
pub fn mark_as_used(
    storage: &dyn KeyValueStorage,
    id: &InventoryItemId,
    confirmation: Confirmation,
) -> anyhow::Result<bool> {
    let removed = remove(storage, id, confirmation)?;
    if removed {
        tracing::info!(id = %id, "Inventory item marked as used");
    }
    Ok(removed)
}

/// Сумма цен позиций (цена уже стоимость позиции целиком)
pub fn total_value(items: &[InventoryItem]) -> f64 {
    items.iter().map(|i| i.price).sum()
}

/// Группировка по категориям в порядке первого появления
pub fn group_by_category(items: &[InventoryItem]) -> Vec<CategoryValue> {
    let mut groups: Vec<CategoryValue> = Vec::new();
    for item in items {
        let category = item.category_or_default();
        let index = match groups.iter().position(|g| g.category == category) {
            Some(index) => index,
            None => {
                groups.push(CategoryValue {
                    category: category.to_string(),
                    value: 0.0,
                    item_count: 0,
                    total_quantity: 0.0,
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        group.value += item.price;
        group.item_count += 1;
        group.total_quantity += item.quantity;
    }
    groups
}

/// Низкий остаток на панелях: количество сравнивается как есть
pub fn is_low_stock(item: &InventoryItem, threshold: f64) -> bool {
    item.quantity <= threshold
}

/// Низкий остаток в ответах ассистента: дробная часть отбрасывается, `10.5` при пороге 10 низкий
pub fn is_low_stock_whole(item: &InventoryItem, threshold: f64) -> bool {
    item.quantity.trunc() <= threshold
}

pub fn stock_status(item: &InventoryItem, threshold: f64) -> StockStatus {
    let quantity = item.quantity;
    if quantity <= 0.0 {
        StockStatus::OutOfStock
    } else if quantity <= CRITICAL_STOCK {
        StockStatus::Critical
    } else if quantity <= threshold {
        StockStatus::Low
    } else {
        StockStatus::Good
    }
}

/// Дней до истечения срока; `None` без даты или с непарсируемой датой
pub fn days_until_expiry(item: &InventoryItem, today: NaiveDate) -> Option<i64> {
    item.expiry_date
        .as_deref()
        .and_then(|date| days_until(date, today))
}

/// Истекает ли срок не позже чем через `window_days` (просроченные тоже считаются)
pub fn is_expiring_within(item: &InventoryItem, today: NaiveDate, window_days: i64) -> bool {
    matches!(days_until_expiry(item, today), Some(days) if days <= window_days)
}

/// Уровень трекера сроков: ≤ critical, ≤ warning, ≤ окна
pub fn expiry_status(days: i64, config: &InventoryConfig) -> Option<ExpiryStatus> {
    if days <= config.critical_days {
        Some(ExpiryStatus::Critical)
    } else if days <= config.warning_days {
        Some(ExpiryStatus::Warning)
    } else if days <= config.expiry_window_days {
        Some(ExpiryStatus::Upcoming)
    } else {
        None
    }
}

/// Счётчики уровней и строки трекера по фильтру, по возрастанию даты
pub fn expiry_tracker(
    items: &[InventoryItem],
    today: NaiveDate,
    filter: ExpiryFilter,
    config: &InventoryConfig,
) -> ExpiryTracker {
    let mut counts = ExpiryBuckets::default();
    let mut rows = Vec::new();

    for item in items {
        let Some(days) = days_until_expiry(item, today) else {
            continue;
        };
        let Some(status) = expiry_status(days, config) else {
            continue;
        };
        match status {
            ExpiryStatus::Critical => counts.critical += 1,
            ExpiryStatus::Warning => counts.warning += 1,
            ExpiryStatus::Upcoming => counts.upcoming += 1,
        }
        if filter.accepts(status) {
            rows.push(ExpiryTrackerRow {
                item: item.clone(),
                days_until_expiry: days,
                status,
            });
        }
    }

    rows.sort_by_key(|row| row.days_until_expiry);
    ExpiryTracker { counts, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::Config;
    use crate::shared::storage::MemoryStorage;
    use crate::shared::test_support::{date, instant, BrokenStorage};

    fn item(name: &str, quantity: f64, price: f64, expiry: Option<&str>) -> InventoryItem {
        InventoryItem {
            id: InventoryItemId::new(name.to_lowercase()),
            name: name.into(),
            quantity,
            price,
            expiry_date: expiry.map(String::from),
            ..Default::default()
        }
    }

    fn new_item(name: &str) -> NewInventoryItem {
        NewInventoryItem {
            name: name.into(),
            category: "Beverages".into(),
            quantity: 15.0,
            unit: "bottles".into(),
            price: 120.0,
            expiry_date: Some(String::new()),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_generates_unique_ids() {
        let storage = MemoryStorage::new();
        let now = instant(2024, 3, 15, 10);
        let first = add(&storage, new_item("Sprite"), now).unwrap();
        let second = add(&storage, new_item("Fanta"), now).unwrap();
        assert_ne!(first, second);

        let items = list(&storage).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].expiry_date, None);
    }

    #[test]
    fn test_add_rejects_empty_name() {
        let storage = MemoryStorage::new();
        assert!(add(&storage, new_item("  "), instant(2024, 3, 15, 10)).is_err());
        assert!(list(&storage).unwrap().is_empty());
    }

    #[test]
    fn test_update_replaces_fields() {
        let storage = MemoryStorage::with_items([(
            "inventoryItems",
            r#"[{"id":"1","name":"Sprite","quantity":15,"price":120,"createdAt":"2024-03-01"}]"#,
        )]);
        let mut edited = list(&storage).unwrap().remove(0);
        edited.extra.clear();
        edited.quantity = 12.0;
        update(&storage, edited).unwrap();

        let items = list(&storage).unwrap();
        assert_eq!(items[0].quantity, 12.0);
        assert_eq!(items[0].extra["createdAt"], "2024-03-01");

        let missing = InventoryItem {
            id: InventoryItemId::new("404"),
            name: "Ghost".into(),
            ..Default::default()
        };
        assert!(update(&storage, missing).is_err());
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let storage = MemoryStorage::new();
        let id = add(&storage, new_item("Sprite"), instant(2024, 3, 15, 10)).unwrap();

        assert!(!remove(&storage, &id, Confirmation::Declined).unwrap());
        assert_eq!(list(&storage).unwrap().len(), 1);

        assert!(mark_as_used(&storage, &id, Confirmation::Confirmed).unwrap());
        assert!(list(&storage).unwrap().is_empty());
        assert!(!remove(&storage, &id, Confirmation::Confirmed).unwrap());
    }

    #[test]
    fn test_storage_failure_propagates() {
        assert!(list(&BrokenStorage).is_err());
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(stock_status(&item("A", 0.0, 1.0, None), 10.0), StockStatus::OutOfStock);
        assert_eq!(stock_status(&item("A", 5.0, 1.0, None), 10.0), StockStatus::Critical);
        assert_eq!(stock_status(&item("A", 10.0, 1.0, None), 10.0), StockStatus::Low);
        assert_eq!(stock_status(&item("A", 10.5, 1.0, None), 10.0), StockStatus::Good);
        assert_eq!(total_value(&[item("A", 3.0, 100.0, None), item("B", 9.0, 50.0, None)]), 150.0);
    }

    #[test]
    fn test_low_stock_fractional_quantity() {
        let item = item("A", 10.5, 1.0, None);
        assert!(!is_low_stock(&item, 10.0));
        assert!(is_low_stock_whole(&item, 10.0));
        assert!(is_low_stock(&item, 10.5));
    }

    #[test]
    fn test_group_by_category_keeps_first_seen_order() {
        let mut items = vec![
            item("Milk", 2.0, 60.0, None),
            item("Sprite", 15.0, 120.0, None),
            item("Curd", 1.0, 40.0, None),
        ];
        items[0].category = "Dairy".into();
        items[2].category = "Dairy".into();

        let groups = group_by_category(&items);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].category, "Dairy");
        assert_eq!(groups[0].value, 100.0);
        assert_eq!(groups[0].item_count, 2);
        assert_eq!(groups[0].total_quantity, 3.0);
        assert_eq!(groups[1].category, "Uncategorized");
    }

    #[test]
    fn test_expiry_tracker_tiers_and_filter() {
        let config = Config::default().inventory;
        let today = date(2024, 3, 15);
        let items = vec![
            item("Week", 1.0, 1.0, Some("2024-03-22")),
            item("Two", 1.0, 1.0, Some("2024-03-17")),
            item("Four", 1.0, 1.0, Some("2024-03-19")),
            item("Late", 1.0, 1.0, Some("2024-03-23")),
            item("Expired", 1.0, 1.0, Some("2024-03-10")),
            item("Never", 1.0, 1.0, None),
        ];

        let tracker = expiry_tracker(&items, today, ExpiryFilter::Critical, &config);
        assert_eq!(tracker.counts, ExpiryBuckets { critical: 2, warning: 1, upcoming: 1 });
        let names: Vec<_> = tracker.rows.iter().map(|r| r.item.name.as_str()).collect();
        assert_eq!(names, vec!["Expired", "Two"]);

        let all = expiry_tracker(&items, today, ExpiryFilter::All, &config);
        let names: Vec<_> = all.rows.iter().map(|r| r.item.name.as_str()).collect();
        assert_eq!(names, vec!["Expired", "Two", "Four", "Week"]);
        assert_eq!(all.rows[2].status, ExpiryStatus::Warning);
    }
}
