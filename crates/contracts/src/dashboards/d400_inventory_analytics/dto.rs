use crate::domain::a001_inventory_item::aggregate::{ExpiryStatus, InventoryItem, StockStatus};
use serde::{Deserialize, Serialize};

/// Карточки метрик аналитики
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsMetrics {
    pub total_inventory_value: f64,
    pub total_orders_value: f64,
    pub average_order_value: f64,
    /// Сумма цен позиций с низким остатком
    pub low_stock_value: f64,
    /// Потери: price × quantity по просроченным позициям
    pub waste_value: f64,
    /// Стоимость заказов к price × quantity склада, в процентах
    pub inventory_efficiency: f64,
}

/// Одна подсказка блока "AI Insights"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub icon: String,
    pub title: String,
    pub description: String,
}

/// Стоимость категории склада
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryValue {
    pub category: String,
    pub value: f64,
    pub item_count: usize,
    pub total_quantity: f64,
}

/// Строка рейтинга самых дорогих позиций
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItem {
    pub name: String,
    pub price: f64,
}

/// Распределение позиций по сроку годности
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryDistribution {
    pub expired: usize,
    /// 0..=7 дней
    pub this_week: usize,
    /// 8..=30 дней
    pub this_month: usize,
    /// 31..=60 дней
    pub next_month: usize,
    pub later: usize,
}

impl ExpiryDistribution {
    /// Подписи и значения в порядке отображения
    pub fn rows(&self) -> [(&'static str, usize); 5] {
        [
            ("Expired", self.expired),
            ("This Week", self.this_week),
            ("This Month", self.this_month),
            ("Next Month", self.next_month),
            ("Later", self.later),
        ]
    }
}

/// Заказы одной категории
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPerformance {
    pub category: String,
    pub total_orders: usize,
    pub completed_orders: usize,
    pub total_value: f64,
    /// Доля выполненных заказов, в процентах
    pub completion_rate: f64,
}

/// Счётчики по уровням остатка
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockBuckets {
    pub out_of_stock: usize,
    pub critical: usize,
    pub low: usize,
    pub good: usize,
}

/// Счётчики по уровням срочности сроков годности
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpiryBuckets {
    pub critical: usize,
    pub warning: usize,
    pub upcoming: usize,
}

/// Позиция, требующая внимания на главной панели
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttentionItem {
    pub item: InventoryItem,
    pub stock_status: StockStatus,
    pub days_until_expiry: Option<i64>,
}

/// Сводка главной панели
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_items: usize,
    pub total_value: f64,
    pub low_stock_count: usize,
    pub expiring_soon_count: usize,
    pub stock: StockBuckets,
    pub expiry: ExpiryBuckets,
    pub attention_items: Vec<AttentionItem>,
}

/// Строка таблицы трекера сроков
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpiryTrackerRow {
    pub item: InventoryItem,
    pub days_until_expiry: i64,
    pub status: ExpiryStatus,
}

/// Трекер сроков: счётчики и отфильтрованные строки
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpiryTracker {
    pub counts: ExpiryBuckets,
    pub rows: Vec<ExpiryTrackerRow>,
}

/// Карточки страницы заказов
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersOverview {
    pub total_orders: usize,
    pub pending_orders: usize,
    /// Ожидающие заказы с датой поставки позже сегодняшней
    pub scheduled_orders: usize,
    pub total_spent: f64,
}
