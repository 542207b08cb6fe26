//! Inventory analytics dashboard: metric cards, insights, category values, the
//! ranking tables and the home page summary. Order figures use the raw stored buckets.

use crate::domain::a001_inventory_item::service::{
    days_until_expiry, expiry_status, group_by_category, is_expiring_within, is_low_stock,
    stock_status, total_value,
};
use crate::shared::config::Config;
use crate::shared::date_utils::parse_date;
use crate::shared::format::format_inr;
use chrono::{Duration, NaiveDate};
use contracts::dashboards::d400_inventory_analytics::{
    AnalyticsMetrics, AttentionItem, CategoryPerformance, CategoryValue, DashboardSummary,
    ExpiryBuckets, ExpiryDistribution, Insight, StockBuckets, TopItem,
};
use contracts::domain::a001_inventory_item::aggregate::{ExpiryStatus, InventoryItem, StockStatus};
use contracts::domain::a002_purchase_order::aggregate::{Order, OrdersStore};

/// Строк в таблице "требуют внимания"
const ATTENTION_LIMIT: usize = 5;

/// Строк в рейтинге по цене
const TOP_ITEMS_LIMIT: usize = 5;

const UNCATEGORIZED: &str = "Uncategorized";

fn all_orders(orders: &OrdersStore) -> impl Iterator<Item = &Order> {
    orders.pending.iter().chain(orders.completed.iter())
}

pub fn analytics_metrics(
    inventory: &[InventoryItem],
    orders: &OrdersStore,
    today: NaiveDate,
    config: &Config,
) -> AnalyticsMetrics {
    let total_inventory_value = total_value(inventory);
    let total_orders_value: f64 = all_orders(orders).map(Order::price_value).sum();
    let order_count = orders.len();
    let average_order_value = if order_count > 0 {
        total_orders_value / order_count as f64
    } else {
        0.0
    };

    let low_stock_value = inventory
        .iter()
        .filter(|item| is_low_stock(item, config.inventory.low_stock_threshold))
        .map(|item| item.price)
        .sum();

    // здесь price × quantity, в отличие от остальных сумм
    let waste_value = inventory
        .iter()
        .filter(|item| matches!(days_until_expiry(item, today), Some(days) if days < 0))
        .map(|item| item.price * item.quantity)
        .sum();

    let stock_value: f64 = inventory.iter().map(|item| item.price * item.quantity).sum();
    let inventory_efficiency = if inventory.is_empty() || stock_value == 0.0 {
        0.0
    } else {
        total_orders_value / stock_value * 100.0
    };

    AnalyticsMetrics {
        total_inventory_value,
        total_orders_value,
        average_order_value,
        low_stock_value,
        waste_value,
        inventory_efficiency,
    }
}

pub fn insights(
    inventory: &[InventoryItem],
    orders: &OrdersStore,
    today: NaiveDate,
    config: &Config,
) -> Vec<Insight> {
    let money = |amount: f64| format_inr(amount, config.analytics.currency_decimals);
    let mut insights = Vec::new();

    let completion_rate = if orders.is_empty() {
        0.0
    } else {
        orders.completed.len() as f64 / orders.len() as f64 * 100.0
    };
    insights.push(Insight {
        icon: "analytics".into(),
        title: "Business Overview".into(),
        description: format!(
            "Current inventory value: {}. Order completion rate: {:.0}%",
            money(total_value(inventory)),
            completion_rate
        ),
    });

    let low_stock = inventory
        .iter()
        .filter(|item| is_low_stock(item, config.inventory.low_stock_threshold))
        .count();
    let expiring = inventory
        .iter()
        .filter(|item| {
            matches!(days_until_expiry(item, today),
                Some(days) if days > 0 && days <= config.analytics.insight_expiry_days)
        })
        .count();
    if low_stock > 0 || expiring > 0 {
        let mut description = format!("{} items low on stock", low_stock);
        if expiring > 0 {
            description.push_str(&format!(" and {} items expiring soon", expiring));
        }
        description.push('.');
        insights.push(Insight {
            icon: "warning".into(),
            title: "Inventory Alerts".into(),
            description,
        });
    }

    let since = today - Duration::days(config.analytics.recent_order_days);
    let recent: Vec<&Order> = all_orders(orders)
        .filter(|order| {
            order
                .order_date
                .as_deref()
                .and_then(parse_date)
                .is_some_and(|date| date >= since)
        })
        .collect();
    let description = if recent.is_empty() {
        format!("No orders in the last {} days", config.analytics.recent_order_days)
    } else {
        let recent_value: f64 = recent.iter().map(|order| order.price_value()).sum();
        format!(
            "{} orders in the last {} days, averaging {} per order",
            recent.len(),
            config.analytics.recent_order_days,
            money(recent_value / recent.len() as f64)
        )
    };
    insights.push(Insight {
        icon: "trending_up".into(),
        title: "Recent Order Activity".into(),
        description,
    });

    insights
}

/// Стоимость по категориям, по убыванию
pub fn category_values(inventory: &[InventoryItem]) -> Vec<CategoryValue> {
    let mut groups = group_by_category(inventory);
    groups.sort_by(|a, b| b.value.total_cmp(&a.value));
    groups
}

/// Самые дорогие позиции по цене за позицию
pub fn top_items(inventory: &[InventoryItem]) -> Vec<TopItem> {
    let mut items: Vec<TopItem> = inventory
        .iter()
        .map(|item| TopItem {
            name: item.name.clone(),
            price: item.price,
        })
        .collect();
    items.sort_by(|a, b| b.price.total_cmp(&a.price));
    items.truncate(TOP_ITEMS_LIMIT);
    items
}

/// Позиции без даты или с непарсируемой датой не учитываются
pub fn expiry_distribution(inventory: &[InventoryItem], today: NaiveDate) -> ExpiryDistribution {
    let mut distribution = ExpiryDistribution::default();
    for days in inventory.iter().filter_map(|item| days_until_expiry(item, today)) {
        match days {
            d if d < 0 => distribution.expired += 1,
            0..=7 => distribution.this_week += 1,
            8..=30 => distribution.this_month += 1,
            31..=60 => distribution.next_month += 1,
            _ => distribution.later += 1,
        }
    }
    distribution
}

fn order_category(order: &Order) -> &str {
    if order.category.is_empty() {
        UNCATEGORIZED
    } else {
        &order.category
    }
}

/// Заказы по категориям склада и заказов, по убыванию суммы.
/// Категория без заказов остаётся в списке с нулями.
pub fn category_performance(inventory: &[InventoryItem], orders: &OrdersStore) -> Vec<CategoryPerformance> {
    let mut categories: Vec<&str> = Vec::new();
    let seen = inventory
        .iter()
        .map(InventoryItem::category_or_default)
        .chain(all_orders(orders).map(order_category));
    for category in seen {
        if !categories.contains(&category) {
            categories.push(category);
        }
    }

    let mut rows: Vec<CategoryPerformance> = categories
        .into_iter()
        .map(|category| {
            let in_category = |order: &&Order| order_category(order) == category;
            let total_orders = all_orders(orders).filter(in_category).count();
            let completed_orders = orders.completed.iter().filter(in_category).count();
            let total_value = all_orders(orders).filter(in_category).map(Order::price_value).sum();
            let completion_rate = if total_orders > 0 {
                completed_orders as f64 / total_orders as f64 * 100.0
            } else {
                0.0
            };
            CategoryPerformance {
                category: category.to_string(),
                total_orders,
                completed_orders,
                total_value,
                completion_rate,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
    rows
}

pub fn dashboard_summary(inventory: &[InventoryItem], today: NaiveDate, config: &Config) -> DashboardSummary {
    let limits = &config.inventory;
    let mut stock = StockBuckets::default();
    let mut expiry = ExpiryBuckets::default();

    for item in inventory {
        match stock_status(item, limits.low_stock_threshold) {
            StockStatus::OutOfStock => stock.out_of_stock += 1,
            StockStatus::Critical => stock.critical += 1,
            StockStatus::Low => stock.low += 1,
            StockStatus::Good => stock.good += 1,
        }
        let status = days_until_expiry(item, today).and_then(|days| expiry_status(days, limits));
        match status {
            Some(ExpiryStatus::Critical) => expiry.critical += 1,
            Some(ExpiryStatus::Warning) => expiry.warning += 1,
            Some(ExpiryStatus::Upcoming) => expiry.upcoming += 1,
            None => {}
        }
    }

    let score = |item: &InventoryItem| {
        let low = if is_low_stock(item, limits.low_stock_threshold) { 2 } else { 0 };
        let expiring = if is_expiring_within(item, today, limits.expiry_window_days) { 1 } else { 0 };
        low + expiring
    };
    let mut attention: Vec<&InventoryItem> = inventory.iter().filter(|item| score(*item) > 0).collect();
    attention.sort_by_key(|item| std::cmp::Reverse(score(*item)));

    DashboardSummary {
        total_items: inventory.len(),
        total_value: total_value(inventory),
        low_stock_count: inventory
            .iter()
            .filter(|item| is_low_stock(item, limits.low_stock_threshold))
            .count(),
        expiring_soon_count: inventory
            .iter()
            .filter(|item| is_expiring_within(item, today, limits.expiry_window_days))
            .count(),
        stock,
        expiry,
        attention_items: attention
            .into_iter()
            .take(ATTENTION_LIMIT)
            .map(|item| AttentionItem {
                item: item.clone(),
                stock_status: stock_status(item, limits.low_stock_threshold),
                days_until_expiry: days_until_expiry(item, today),
            })
            .collect(),
    }
}
