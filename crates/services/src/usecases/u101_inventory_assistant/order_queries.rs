//! Order sub-dispatcher.
//!
//! `None` means "not an order-specific question" and lets the main chain
//! continue; a supplier with no orders is a terminal negative answer.

use super::intents::{is_order_count, is_total_order_value};
use super::patterns::{first_capture, SUPPLIER_ORDERS};
use super::reports::{by_date_ascending, by_date_descending, supplier_matches, AnswerContext};
use crate::domain::a002_purchase_order::snapshot::calculate_orders_value;
use crate::shared::format::format_quantity;
use contracts::domain::a002_purchase_order::aggregate::Order;

/// Сколько последних выполненных заказов показывать
const RECENT_COMPLETIONS: usize = 5;

pub fn process_order_query(ctx: &AnswerContext, message: &str) -> Option<String> {
    let lower = message.to_lowercase();
    let orders = ctx.orders;

    if lower.contains("pending orders") || lower.contains("show pending") {
        if orders.pending.is_empty() {
            return Some("No pending orders found.".to_string());
        }
        let mut response = format!(
            "Pending Orders ({}):\nTotal Value: {}\n\n",
            orders.pending.len(),
            ctx.money(orders.pending_value)
        );
        let mut pending: Vec<&Order> = orders.pending.iter().collect();
        pending.sort_by(|a, b| by_date_ascending(a.delivery_or_order_date(), b.delivery_or_order_date()));
        for order in pending {
            response.push_str(&order_block(ctx, order, "Due"));
        }
        return Some(response);
    }

    if lower.contains("completed orders") || lower.contains("show completed") {
        if orders.completed.is_empty() {
            return Some("No completed orders found.".to_string());
        }
        let mut response = format!(
            "Completed Orders ({}):\nTotal Value: {}\n\nRecent Completions:\n",
            orders.completed.len(),
            ctx.money(orders.completed_value)
        );
        let mut completed: Vec<&Order> = orders.completed.iter().collect();
        completed.sort_by(|a, b| by_date_descending(a.delivery_or_order_date(), b.delivery_or_order_date()));
        for order in completed.into_iter().take(RECENT_COMPLETIONS) {
            response.push_str(&order_block(ctx, order, "Completed"));
        }
        if orders.completed.len() > RECENT_COMPLETIONS {
            response.push_str(&format!(
                "... and {} more completed orders",
                orders.completed.len() - RECENT_COMPLETIONS
            ));
        }
        return Some(response);
    }

    if is_total_order_value(&lower) {
        return Some(format!(
            "Order Values:\n• Pending Orders: {}\n• Completed Orders: {}\n• Total Value: {}",
            ctx.money(orders.pending_value),
            ctx.money(orders.completed_value),
            ctx.money(orders.total_value)
        ));
    }

    if is_order_count(&lower) {
        return Some(format!(
            "Order Counts:\n• Pending Orders: {}\n• Completed Orders: {}\n• Total Orders: {}",
            orders.pending.len(),
            orders.completed.len(),
            orders.all.len()
        ));
    }

    let supplier = first_capture(&SUPPLIER_ORDERS, &lower, "supplier")?;
    Some(supplier_report(ctx, &supplier.to_lowercase()))
}

/// `• name` и строки цены, даты, поставщика
fn order_block(ctx: &AnswerContext, order: &Order, date_label: &str) -> String {
    let mut block = format!("• {}\n  - Price: {}\n", order.name, ctx.money(order.price_value()));
    if let Some(date) = order.delivery_or_order_date() {
        block.push_str(&format!("  - {}: {}\n", date_label, ctx.date(Some(date))));
    }
    if let Some(supplier) = order.supplier.as_deref() {
        block.push_str(&format!("  - Supplier: {}\n", supplier));
    }
    block.push('\n');
    block
}

fn supplier_report(ctx: &AnswerContext, supplier: &str) -> String {
    let orders = ctx.orders;
    let supplier_orders: Vec<Order> = orders
        .all
        .iter()
        .filter(|o| supplier_matches(o, supplier))
        .cloned()
        .collect();
    if supplier_orders.is_empty() {
        return format!("No orders found from supplier matching \"{}\".", supplier);
    }

    let mut response = format!(
        "Orders from \"{}\":\nTotal Orders: {}\nTotal Value: {}\n\n",
        supplier,
        supplier_orders.len(),
        ctx.money(calculate_orders_value(&supplier_orders))
    );

    // pending: same name and supplier as an order in the pending bucket
    let pending: Vec<&Order> = supplier_orders
        .iter()
        .filter(|o| {
            orders
                .pending
                .iter()
                .any(|p| p.name == o.name && p.supplier == o.supplier)
        })
        .collect();
    if !pending.is_empty() {
        response.push_str("Pending Orders:\n");
        for order in pending {
            // here the amount is price × quantity, unlike every other total
            let quantity = if order.quantity == 0.0 { 1.0 } else { order.quantity };
            response.push_str(&format!(
                "• {}: {} ({} {})\n",
                order.name,
                ctx.money(order.price_value() * quantity),
                format_quantity(quantity),
                order.unit_or_default()
            ));
        }
    }
    response
}
