//! Free text → inventory item or order.
//!
//! Two lookup routines with different tie-break rules coexist:
//! [`ItemResolver::resolve`] (primary, used by most intents) and
//! [`ItemResolver::find_by_name`] (second attempt of the price intent).
//! They are not interchangeable.

use super::patterns::{first_capture, ITEM_NAME_PATTERNS, STOP_WORDS};
use crate::domain::a002_purchase_order::OrdersSnapshot;
use contracts::domain::a001_inventory_item::aggregate::InventoryItem;
use contracts::domain::a002_purchase_order::aggregate::Order;

/// Кандидаты короче этого числа символов не ищутся
const MIN_NAME_CHARS: usize = 2;

/// Коллекция, в которой найдена позиция
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemSource {
    Inventory,
    PendingOrders,
    CompletedOrders,
}

impl ItemSource {
    pub fn label(&self) -> &'static str {
        match self {
            ItemSource::Inventory => "inventory",
            ItemSource::PendingOrders => "pending orders",
            ItemSource::CompletedOrders => "completed orders",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ItemRef<'a> {
    Inventory(&'a InventoryItem),
    Order(&'a Order),
}

impl<'a> ItemRef<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            ItemRef::Inventory(item) => &item.name,
            ItemRef::Order(order) => &order.name,
        }
    }

    pub fn price(&self) -> f64 {
        match self {
            ItemRef::Inventory(item) => item.price,
            ItemRef::Order(order) => order.price_value(),
        }
    }

    pub fn supplier(&self) -> Option<&'a str> {
        match self {
            ItemRef::Inventory(item) => item.supplier.as_deref(),
            ItemRef::Order(order) => order.supplier.as_deref(),
        }
    }
}

/// Найденная позиция и её источник
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedItem<'a> {
    pub item: ItemRef<'a>,
    pub source: ItemSource,
}

impl<'a> ResolvedItem<'a> {
    fn inventory(item: &'a InventoryItem) -> Self {
        Self {
            item: ItemRef::Inventory(item),
            source: ItemSource::Inventory,
        }
    }

    fn order(order: &'a Order, source: ItemSource) -> Self {
        Self {
            item: ItemRef::Order(order),
            source,
        }
    }
}

/// Candidate item name from a free-text query.
///
/// Tries the price / quantity / stock patterns in order; otherwise keeps the
/// lower-cased words that are not stop words and longer than one character.
pub fn extract_item_name(query: &str) -> String {
    if let Some(name) = first_capture(&ITEM_NAME_PATTERNS, query, "item") {
        tracing::debug!(name = %name, "Item name matched a question pattern");
        return name;
    }

    let name = query
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !STOP_WORDS.contains(word) && word.chars().count() > 1)
        .collect::<Vec<_>>()
        .join(" ");
    tracing::debug!(name = %name, "Item name extracted by word filtering");
    name
}

fn too_short(name: &str) -> bool {
    name.chars().count() < MIN_NAME_CHARS
}

fn name_equals(name: &str, needle: &str) -> bool {
    !name.is_empty() && name.to_lowercase() == needle
}

fn name_contains(name: &str, needle: &str) -> bool {
    !name.is_empty() && name.to_lowercase().contains(needle)
}

/// Поиск позиций по снимку склада и заказов одного запроса
pub struct ItemResolver<'a> {
    inventory: &'a [InventoryItem],
    orders: &'a OrdersSnapshot,
}

impl<'a> ItemResolver<'a> {
    pub fn new(inventory: &'a [InventoryItem], orders: &'a OrdersSnapshot) -> Self {
        Self { inventory, orders }
    }

    /// Primary lookup: extracts the name from `query`, then searches
    /// inventory (exact, substring, any word), pending orders (exact, substring),
    /// completed orders (exact, substring). First hit wins.
    pub fn resolve(&self, query: &str) -> Option<ResolvedItem<'a>> {
        let name = extract_item_name(query);
        if too_short(&name) {
            tracing::debug!(name = %name, "Item name too short or empty");
            return None;
        }
        let needle = name.to_lowercase();

        let inventory_hit = self
            .inventory
            .iter()
            .find(|item| name_equals(&item.name, &needle))
            .or_else(|| {
                self.inventory
                    .iter()
                    .find(|item| name_contains(&item.name, &needle))
            })
            .or_else(|| {
                if !needle.contains(' ') {
                    return None;
                }
                let words: Vec<&str> = needle.split_whitespace().collect();
                self.inventory.iter().find(|item| {
                    !item.name.is_empty() && {
                        let lower = item.name.to_lowercase();
                        words.iter().any(|word| lower.contains(word))
                    }
                })
            });
        if let Some(item) = inventory_hit {
            tracing::debug!(name = %item.name, "Found in inventory");
            return Some(ResolvedItem::inventory(item));
        }

        let buckets = [
            (&self.orders.pending, ItemSource::PendingOrders),
            (&self.orders.completed, ItemSource::CompletedOrders),
        ];
        for (orders, source) in buckets {
            let hit = orders
                .iter()
                .find(|order| name_equals(&order.name, &needle))
                .or_else(|| orders.iter().find(|order| name_contains(&order.name, &needle)));
            if let Some(order) = hit {
                tracing::debug!(name = %order.name, source = source.label(), "Found in orders");
                return Some(ResolvedItem::order(order, source));
            }
        }

        tracing::debug!(name = %name, "Item not found");
        None
    }

    /// Second-attempt lookup by an already extracted `name`.
    ///
    /// Inventory: exact, substring, then each word longer than two characters in
    /// turn (first word with a hit wins). Orders: a single substring pass per bucket.
    pub fn find_by_name(&self, name: &str) -> Option<ResolvedItem<'a>> {
        if too_short(name) {
            return None;
        }
        let needle = name.to_lowercase();

        let mut inventory_hit = self
            .inventory
            .iter()
            .find(|item| name_equals(&item.name, &needle))
            .or_else(|| {
                self.inventory
                    .iter()
                    .find(|item| name_contains(&item.name, &needle))
            });
        if inventory_hit.is_none() && needle.contains(' ') {
            inventory_hit = needle
                .split_whitespace()
                .filter(|word| word.chars().count() > 2)
                .find_map(|word| {
                    self.inventory
                        .iter()
                        .find(|item| name_contains(&item.name, word))
                });
        }
        if let Some(item) = inventory_hit {
            tracing::debug!(name = %item.name, "Found in inventory by direct name search");
            return Some(ResolvedItem::inventory(item));
        }

        if let Some(order) = self
            .orders
            .pending
            .iter()
            .find(|order| name_contains(&order.name, &needle))
        {
            return Some(ResolvedItem::order(order, ItemSource::PendingOrders));
        }
        self.orders
            .completed
            .iter()
            .find(|order| name_contains(&order.name, &needle))
            .map(|order| ResolvedItem::order(order, ItemSource::CompletedOrders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_purchase_order::aggregate::OrdersStore;

    fn inventory(names: &[&str]) -> Vec<InventoryItem> {
        names
            .iter()
            .map(|name| InventoryItem {
                name: name.to_string(),
                price: 100.0,
                ..Default::default()
            })
            .collect()
    }

    fn order(name: &str, price: f64) -> Order {
        Order {
            name: name.into(),
            price: Some(price),
            ..Default::default()
        }
    }

    fn snapshot(pending: Vec<Order>, completed: Vec<Order>) -> OrdersSnapshot {
        OrdersSnapshot::from_store(OrdersStore { pending, completed })
    }

    #[test]
    fn test_extract_item_name_patterns() {
        assert_eq!(extract_item_name("What's the price of Coca Cola?"), "Coca Cola");
        assert_eq!(extract_item_name("price of sprite"), "sprite");
        assert_eq!(extract_item_name("How many Sprite do we have?"), "Sprite");
        assert_eq!(extract_item_name("stock of paneer"), "paneer");
        assert_eq!(extract_item_name("Inventory of basmati rice?"), "basmati rice");
    }

    #[test]
    fn test_extract_item_name_fallback() {
        assert_eq!(extract_item_name("Who supplies Pepsi"), "pepsi");
        assert_eq!(extract_item_name("tell me about the amul butter"), "amul butter");
        assert_eq!(extract_item_name("what is x"), "");
        assert_eq!(extract_item_name("supplier?"), "supplier?");
    }

    #[test]
    fn test_short_names_never_match() {
        let items = inventory(&["a", "ab"]);
        let orders = snapshot(vec![], vec![]);
        let resolver = ItemResolver::new(&items, &orders);
        assert!(resolver.resolve("price of a").is_none());
        assert!(resolver.resolve("price of ?").is_none());
        assert!(resolver.find_by_name("a").is_none());
        assert!(resolver.find_by_name("").is_none());
    }

    #[test]
    fn test_exact_match_beats_substring() {
        let items = inventory(&["Coca Cola", "Cola"]);
        let orders = snapshot(vec![], vec![]);
        let resolver = ItemResolver::new(&items, &orders);
        let hit = resolver.resolve("price of cola").unwrap();
        assert_eq!(hit.item.name(), "Cola");
        assert_eq!(hit.source, ItemSource::Inventory);
    }

    #[test]
    fn test_inventory_beats_orders() {
        let items = inventory(&["Milk"]);
        let orders = snapshot(vec![order("Milk", 500.0)], vec![order("Milk", 400.0)]);
        let resolver = ItemResolver::new(&items, &orders);
        assert_eq!(resolver.resolve("price of milk").unwrap().source, ItemSource::Inventory);
    }

    #[test]
    fn test_orders_search_order() {
        let items = inventory(&["Sprite"]);
        let orders = snapshot(
            vec![order("Paneer Block", 300.0)],
            vec![order("Paneer", 250.0)],
        );
        let resolver = ItemResolver::new(&items, &orders);

        // substring in pending wins over exact in completed
        let hit = resolver.resolve("price of paneer").unwrap();
        assert_eq!(hit.source, ItemSource::PendingOrders);
        assert_eq!(hit.item.name(), "Paneer Block");
        assert_eq!(hit.source.label(), "pending orders");

        let hit = resolver.resolve("stock of paneer block").unwrap();
        assert_eq!(hit.source, ItemSource::PendingOrders);
        assert_eq!(hit.item.price(), 300.0);
    }

    #[test]
    fn test_word_overlap_takes_first_item_in_storage_order() {
        let items = inventory(&["Amul Butter", "Fresh Cream"]);
        let orders = snapshot(vec![], vec![]);
        let resolver = ItemResolver::new(&items, &orders);
        let hit = resolver.resolve("price of cream butter").unwrap();
        assert_eq!(hit.item.name(), "Amul Butter");
    }

    #[test]
    fn test_find_by_name_skips_short_words() {
        let items = inventory(&["Tofu Cubes", "Green Peas"]);
        let orders = snapshot(vec![], vec![order("Dal Makhani Kit", 900.0)]);
        let resolver = ItemResolver::new(&items, &orders);

        // primary path: any word, "of" already hits "Tofu Cubes"
        assert_eq!(resolver.resolve("inventory of of peas").unwrap().item.name(), "Tofu Cubes");

        // direct search ignores words of two characters
        let hit = resolver.find_by_name("of peas").unwrap();
        assert_eq!(hit.item.name(), "Green Peas");

        // no exact pass for orders: substring only
        let hit = resolver.find_by_name("makhani").unwrap();
        assert_eq!(hit.source, ItemSource::CompletedOrders);
    }

    #[test]
    fn test_not_found() {
        let items = inventory(&["Sprite"]);
        let orders = snapshot(vec![], vec![]);
        let resolver = ItemResolver::new(&items, &orders);
        assert!(resolver.resolve("price of fanta").is_none());
        assert!(resolver.find_by_name("fanta").is_none());
    }
}
