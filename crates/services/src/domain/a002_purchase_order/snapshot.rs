use super::repository;
use crate::shared::storage::{KeyValueStorage, StorageError};
use contracts::domain::a002_purchase_order::aggregate::{Order, OrdersStore};

/// Проверенное представление заказов на один запрос
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrdersSnapshot {
    pub pending: Vec<Order>,
    pub completed: Vec<Order>,
    /// pending, затем completed
    pub all: Vec<Order>,
    pub pending_value: f64,
    pub completed_value: f64,
    pub total_value: f64,
}

impl OrdersSnapshot {
    /// Отбросить заказы без имени или цены и посчитать суммы
    pub fn from_store(store: OrdersStore) -> Self {
        let pending: Vec<Order> = store.pending.into_iter().filter(Order::is_valid).collect();
        let completed: Vec<Order> = store.completed.into_iter().filter(Order::is_valid).collect();
        let pending_value = calculate_orders_value(&pending);
        let completed_value = calculate_orders_value(&completed);
        let all = pending.iter().chain(completed.iter()).cloned().collect();

        Self {
            pending,
            completed,
            all,
            pending_value,
            completed_value,
            total_value: pending_value + completed_value,
        }
    }

    pub fn load(storage: &dyn KeyValueStorage) -> Result<Self, StorageError> {
        repository::load_store(storage).map(Self::from_store)
    }

    pub fn total_count(&self) -> usize {
        self.pending.len() + self.completed.len()
    }
}

/// Сумма цен заказов; количество не учитывается
pub fn calculate_orders_value(orders: &[Order]) -> f64 {
    orders.iter().map(Order::price_value).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(name: &str, price: Option<f64>, quantity: f64) -> Order {
        Order {
            name: name.into(),
            price,
            quantity,
            ..Default::default()
        }
    }

    #[test]
    fn test_values_ignore_quantity() {
        let store = OrdersStore {
            pending: vec![order("Milk", Some(500.0), 10.0), order("Eggs", Some(300.0), 3.0)],
            completed: vec![],
        };
        let snapshot = OrdersSnapshot::from_store(store);
        assert_eq!(snapshot.pending_value, 800.0);
        assert_eq!(snapshot.completed_value, 0.0);
        assert_eq!(snapshot.total_value, 800.0);
    }

    #[test]
    fn test_invalid_orders_filtered() {
        let store = OrdersStore {
            pending: vec![order("", Some(100.0), 1.0), order("Rice", None, 1.0)],
            completed: vec![order("Oil", Some(0.0), 1.0)],
        };
        let snapshot = OrdersSnapshot::from_store(store);
        assert!(snapshot.pending.is_empty());
        assert_eq!(snapshot.completed.len(), 1);
        assert_eq!(snapshot.all.len(), 1);
        assert_eq!(snapshot.total_value, 0.0);
    }

    #[test]
    fn test_empty_snapshot() {
        let snapshot = OrdersSnapshot::from_store(OrdersStore::default());
        assert_eq!(snapshot.total_value, 0.0);
        assert_eq!(snapshot.total_count(), 0);
    }
}
