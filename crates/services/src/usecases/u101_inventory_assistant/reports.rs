//! Aggregate answers: value totals, category reports, expiry and order overviews.

use super::intents::is_expiry_count;
use super::item_resolver::ItemResolver;
use super::patterns::{first_capture, SUPPLIER_ORDERS_OVERVIEW};
use crate::domain::a001_inventory_item::service::{
    days_until_expiry, group_by_category, is_low_stock_whole, total_value,
};
use crate::domain::a002_purchase_order::OrdersSnapshot;
use crate::shared::config::InventoryConfig;
use crate::shared::date_utils::{days_until, parse_date};
use crate::shared::format::{format_date, format_inr, format_percent, format_quantity};
use chrono::NaiveDate;
use contracts::domain::a001_inventory_item::aggregate::InventoryItem;
use contracts::domain::a002_purchase_order::aggregate::Order;
use std::cmp::Ordering;

pub const HELP_MESSAGE: &str = "I can help you with information about:\n\n\
• Inventory Status (e.g., 'How many sprite do we have?')\n\
• Item Details (e.g., 'What's the price of coca cola?')\n\
• Supplier Information (e.g., 'Who supplies pepsi?')\n\
• Expiring Items (e.g., 'Show items expiring soon')\n\
• Order Status (e.g., 'Show pending orders')\n\
• Analytics Reports (e.g., 'Show inventory value by category')\n\n\
Please ask me about any of these topics!";

/// Данные и настройки одного ответа ассистента
pub struct AnswerContext<'a> {
    pub inventory: &'a [InventoryItem],
    pub orders: &'a OrdersSnapshot,
    pub today: NaiveDate,
    pub limits: &'a InventoryConfig,
    pub currency_decimals: u8,
}

impl<'a> AnswerContext<'a> {
    pub fn money(&self, amount: f64) -> String {
        format_inr(amount, self.currency_decimals)
    }

    pub fn date(&self, value: Option<&str>) -> String {
        match value {
            Some(value) => format_date(value, self.today),
            None => "no date".to_string(),
        }
    }

    pub fn days_until(&self, value: Option<&str>) -> Option<i64> {
        value.and_then(|v| days_until(v, self.today))
    }

    pub fn resolver(&self) -> ItemResolver<'a> {
        ItemResolver::new(self.inventory, self.orders)
    }

    pub fn inventory_value(&self) -> f64 {
        total_value(self.inventory)
    }

    fn low_stock_items(&self) -> Vec<&'a InventoryItem> {
        self.inventory
            .iter()
            .filter(|item| is_low_stock_whole(item, self.limits.low_stock_threshold))
            .collect()
    }

    /// Позиции со сроком в пределах окна (включая просроченные) и дни до срока
    fn expiring_items(&self) -> Vec<(&'a InventoryItem, i64)> {
        self.inventory
            .iter()
            .filter_map(|item| days_until_expiry(item, self.today).map(|days| (item, days)))
            .filter(|(_, days)| *days <= self.limits.expiry_window_days)
            .collect()
    }
}

/// Share of `total` with one decimal, `0.0` when there is nothing to share
fn percent_of(value: f64, total: f64) -> String {
    if total > 0.0 {
        format_percent(value / total * 100.0)
    } else {
        "0.0".to_string()
    }
}

/// По дате (возрастание); заказы без даты в конце
pub(crate) fn by_date_ascending(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a.and_then(parse_date), b.and_then(parse_date)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// По дате (убывание); заказы без даты в конце
pub(crate) fn by_date_descending(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a.and_then(parse_date), b.and_then(parse_date)) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn category_value_breakdown(ctx: &AnswerContext) -> String {
    let total = ctx.inventory_value();
    let mut groups = group_by_category(ctx.inventory);
    groups.sort_by(|a, b| b.value.total_cmp(&a.value));

    let mut response = format!("Inventory Value by Category (Total: {}):\n\n", ctx.money(total));
    for (index, group) in groups.iter().enumerate() {
        response.push_str(&format!(
            "{}. {}: {} ({}%)\n",
            index + 1,
            group.category,
            ctx.money(group.value),
            percent_of(group.value, total)
        ));
        response.push_str(&format!("   Items: {}\n", group.item_count));

        let mut items: Vec<&InventoryItem> = ctx
            .inventory
            .iter()
            .filter(|item| item.category_or_default() == group.category)
            .collect();
        items.sort_by(|a, b| b.price.total_cmp(&a.price));
        let top: Vec<String> = items
            .iter()
            .take(3)
            .map(|item| format!("{} ({})", item.name, ctx.money(item.price)))
            .collect();
        response.push_str(&format!("   Top items: {}\n", top.join(", ")));
        response.push('\n');
    }
    response
}

pub fn total_inventory_value(ctx: &AnswerContext) -> String {
    format!("The total inventory value is {}.", ctx.money(ctx.inventory_value()))
}

pub fn total_order_value(ctx: &AnswerContext) -> String {
    format!("The total value of all orders is {}.", ctx.money(ctx.orders.total_value))
}

pub fn analytics_summary(ctx: &AnswerContext) -> String {
    format!(
        "Analytics Summary:\n\
         • Inventory Value: {}\n\
         • Pending Orders Value: {}\n\
         • Completed Orders Value: {}\n\
         • Total Items in Inventory: {}",
        ctx.money(ctx.inventory_value()),
        ctx.money(ctx.orders.pending_value),
        ctx.money(ctx.orders.completed_value),
        ctx.inventory.len()
    )
}

pub fn category_analysis(ctx: &AnswerContext) -> String {
    let mut groups = group_by_category(ctx.inventory);
    groups.sort_by(|a, b| b.item_count.cmp(&a.item_count));

    let mut response = String::from("Category Breakdown:\n");
    for group in groups {
        response.push_str(&format!(
            "• {}: {} items, {}\n",
            group.category,
            group.item_count,
            ctx.money(group.value)
        ));
    }
    response
}

pub fn expiry_report(ctx: &AnswerContext, lower: &str) -> String {
    let expiring = ctx.expiring_items();
    if is_expiry_count(lower) {
        return format!(
            "There are {} items expiring within the next week.",
            expiring.len()
        );
    }
    if expiring.is_empty() {
        return "Good news! I don't see any items expiring within the next week.".to_string();
    }

    let critical_days = ctx.limits.critical_days;
    let line = |item: &InventoryItem, days: i64| {
        format!(
            "• {}: {} ({} days left)\n",
            item.name,
            ctx.date(item.expiry_date.as_deref()),
            days
        )
    };

    let mut response = String::from("Expiring Items Report:\n\n");
    let critical: Vec<_> = expiring.iter().filter(|(_, d)| *d <= critical_days).collect();
    if !critical.is_empty() {
        response.push_str(&format!("Critical (0-{} days):\n", critical_days));
        for &(item, days) in critical {
            response.push_str(&line(item, days));
        }
        response.push('\n');
    }

    let warning: Vec<_> = expiring.iter().filter(|(_, d)| *d > critical_days).collect();
    if !warning.is_empty() {
        response.push_str(&format!(
            "Warning ({}-{} days):\n",
            critical_days + 1,
            ctx.limits.expiry_window_days
        ));
        for &(item, days) in warning {
            response.push_str(&line(item, days));
        }
    }

    let value: f64 = expiring.iter().map(|(item, _)| item.price).sum();
    response.push_str(&format!("\nTotal value of expiring items: {}", ctx.money(value)));
    response
}

pub fn order_count(ctx: &AnswerContext) -> String {
    let pending = ctx.orders.pending.len();
    let completed = ctx.orders.completed.len();
    format!(
        "You have {} pending orders and {} completed orders ({} total).",
        pending,
        completed,
        pending + completed
    )
}

/// Обзор заказов: по поставщику, только pending, только completed или полный
pub fn order_status(ctx: &AnswerContext, lower: &str) -> String {
    if let Some(supplier) = first_capture(&SUPPLIER_ORDERS_OVERVIEW, lower, "supplier") {
        let supplier = supplier.to_lowercase();
        let matches: Vec<&Order> = ctx
            .orders
            .all
            .iter()
            .filter(|o| supplier_matches(o, &supplier))
            .collect();
        if matches.is_empty() {
            return format!(
                "I couldn't find any orders from suppliers matching \"{}\".",
                supplier
            );
        }
        let mut response = format!(
            "Found {} orders from suppliers matching \"{}\":\n\n",
            matches.len(),
            supplier
        );
        for order in matches {
            response.push_str(&format!(
                "• {}: {} ({})\n",
                order.name,
                ctx.money(order.price_value()),
                ctx.date(order.order_or_delivery_date())
            ));
        }
        return response;
    }

    if lower.contains("pending orders") {
        if ctx.orders.pending.is_empty() {
            return "You have no pending orders.".to_string();
        }
        let mut response = format!("Pending Orders ({}):\n", ctx.orders.pending.len());
        for order in &ctx.orders.pending {
            response.push_str(&format!(
                "• {}: {} (Due: {})\n",
                order.name,
                ctx.money(order.price_value()),
                ctx.date(order.delivery_date.as_deref())
            ));
        }
        return response;
    }

    if lower.contains("completed orders") {
        let completed = &ctx.orders.completed;
        if completed.is_empty() {
            return "You have no completed orders.".to_string();
        }
        let mut response = format!("Completed Orders ({}):\n", completed.len());
        for order in completed.iter().take(5) {
            response.push_str(&format!(
                "• {}: {} (Completed: {})\n",
                order.name,
                ctx.money(order.price_value()),
                ctx.date(order.delivery_date.as_deref())
            ));
        }
        if completed.len() > 5 {
            response.push_str(&format!("\n... and {} more.", completed.len() - 5));
        }
        return response;
    }

    order_overview(ctx)
}

fn order_overview(ctx: &AnswerContext) -> String {
    let orders = ctx.orders;
    let mut response = String::from("Order Status Overview:\n\nCurrent Status:\n");
    response.push_str(&format!(
        "• Pending Orders: {} (Value: {})\n",
        orders.pending.len(),
        ctx.money(orders.pending_value)
    ));
    response.push_str(&format!(
        "• Completed Orders: {} (Value: {})\n\n",
        orders.completed.len(),
        ctx.money(orders.completed_value)
    ));

    if !orders.pending.is_empty() {
        response.push_str("Recent Pending Orders:\n");
        let mut pending: Vec<&Order> = orders.pending.iter().collect();
        pending.sort_by(|a, b| by_date_ascending(a.delivery_date.as_deref(), b.delivery_date.as_deref()));
        for order in pending.into_iter().take(5) {
            let delivery = order.delivery_date.as_deref();
            response.push_str(&format!("• {} - {}\n", order.name, ctx.money(order.price_value())));
            match ctx.days_until(delivery) {
                Some(days) => response.push_str(&format!(
                    "  Due: {} ({} days left)\n",
                    ctx.date(delivery),
                    days
                )),
                None => response.push_str(&format!("  Due: {}\n", ctx.date(delivery))),
            }
        }
    }

    let mut completed: Vec<&Order> = orders.completed.iter().collect();
    completed.sort_by(|a, b| by_date_descending(a.delivery_date.as_deref(), b.delivery_date.as_deref()));
    if !completed.is_empty() {
        response.push_str("\nRecently Completed Orders:\n");
        for order in completed.into_iter().take(3) {
            response.push_str(&format!(
                "• {} - {} (Completed: {})\n",
                order.name,
                ctx.money(order.price_value()),
                ctx.date(order.delivery_date.as_deref())
            ));
        }
    }
    response
}

pub(crate) fn supplier_matches(order: &Order, supplier: &str) -> bool {
    order
        .supplier
        .as_deref()
        .is_some_and(|s| s.to_lowercase().contains(supplier))
}

pub fn inventory_summary(ctx: &AnswerContext) -> String {
    format!(
        "Inventory Summary:\n\
         • Total Items: {}\n\
         • Total Value: {}\n\
         • Low Stock Items: {}\n\
         • Expiring Soon: {}",
        ctx.inventory.len(),
        ctx.money(ctx.inventory_value()),
        ctx.low_stock_items().len(),
        ctx.expiring_items().len()
    )
}

pub fn analytics_report(ctx: &AnswerContext) -> String {
    let inventory_value = ctx.inventory_value();
    let low_stock = ctx.low_stock_items();

    let mut response = String::from("Inventory Analytics Report:\n\nOverall Summary:\n");
    response.push_str(&format!("• Total Inventory Value: {}\n", ctx.money(inventory_value)));
    response.push_str(&format!("• Total Orders Value: {}\n", ctx.money(ctx.orders.total_value)));
    response.push_str(&format!("• Total Items: {}\n", ctx.inventory.len()));
    response.push_str(&format!("• Low Stock Items: {}\n\n", low_stock.len()));

    response.push_str("Category Analysis:\n");
    let mut groups = group_by_category(ctx.inventory);
    groups.sort_by(|a, b| b.value.total_cmp(&a.value));
    for group in groups {
        response.push_str(&format!("• {}:\n", group.category));
        response.push_str(&format!(
            "  - Value: {} ({}%)\n",
            ctx.money(group.value),
            percent_of(group.value, inventory_value)
        ));
        response.push_str(&format!("  - Items: {}\n", group.item_count));
    }

    if !low_stock.is_empty() {
        response.push_str("\nLow Stock Alert:\n");
        for item in low_stock.iter().take(5) {
            response.push_str(&format!(
                "• {}: {} {} remaining\n",
                item.name,
                format_quantity(item.quantity),
                item.unit_or_default()
            ));
        }
        if low_stock.len() > 5 {
            response.push_str(&format!("... and {} more items\n", low_stock.len() - 5));
        }
    }
    response
}
