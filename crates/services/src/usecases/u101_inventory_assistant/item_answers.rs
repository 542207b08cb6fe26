//! Answers about one item: price, stock, supplier, details.

use super::item_resolver::{extract_item_name, ItemRef, ItemSource, ResolvedItem};
use super::patterns::{capture, first_capture, PRICE_OF, QUANTITY_NAME_PATTERNS};
use super::reports::AnswerContext;
use crate::domain::a001_inventory_item::service::days_until_expiry;
use crate::shared::format::format_quantity;

fn price_line(ctx: &AnswerContext, hit: ResolvedItem) -> String {
    match hit.source {
        ItemSource::Inventory => format!(
            "The price of {} is {}.",
            hit.item.name(),
            ctx.money(hit.item.price())
        ),
        _ => format!(
            "{} was last ordered at {}.",
            hit.item.name(),
            ctx.money(hit.item.price())
        ),
    }
}

fn stock_line(hit: ResolvedItem) -> String {
    match hit.item {
        ItemRef::Inventory(item) => format!(
            "There are {} {} of {} in stock.",
            format_quantity(item.quantity),
            item.unit_or_default(),
            item.name
        ),
        ItemRef::Order(order) => format!(
            "{} was found in {}, not in inventory stock.",
            order.name,
            hit.source.label()
        ),
    }
}

/// Цена: основной поиск, затем прямой поиск по имени из фразы `price of X`
pub fn price_answer(ctx: &AnswerContext, message: &str) -> String {
    let resolver = ctx.resolver();
    if let Some(hit) = resolver.resolve(message) {
        return price_line(ctx, hit);
    }

    if let Some(name) = capture(&PRICE_OF, message, "item") {
        tracing::debug!(name = %name, "Direct price pattern match");
        if let Some(hit) = resolver.find_by_name(&name) {
            return price_line(ctx, hit);
        }
    }

    format!(
        "I couldn't find price information for \"{}\". Is it in your inventory?",
        extract_item_name(message)
    )
}

pub fn quantity_answer(ctx: &AnswerContext, message: &str) -> String {
    if let Some(hit) = ctx.resolver().resolve(message) {
        return stock_line(hit);
    }

    let name = first_capture(&QUANTITY_NAME_PATTERNS, message, "item")
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "that item".to_string());
    format!(
        "I couldn't find \"{}\" in your inventory. Would you like to add it to your inventory?",
        name
    )
}

/// Короткая форма вопроса о количестве (`how many eggs`)
pub fn quick_quantity_answer(ctx: &AnswerContext, message: &str) -> String {
    match ctx.resolver().resolve(message) {
        Some(hit) => stock_line(hit),
        None => format!(
            "I couldn't find an item matching \"{}\" in the inventory.",
            extract_item_name(message)
        ),
    }
}

pub fn supplier_answer(ctx: &AnswerContext, message: &str) -> String {
    let Some(hit) = ctx.resolver().resolve(message) else {
        return format!(
            "I couldn't find an item matching \"{}\" in your inventory or orders.",
            extract_item_name(message)
        );
    };
    match hit.item.supplier() {
        Some(supplier) => format!("{} is supplied by {}.", hit.item.name(), supplier),
        None => format!(
            "I found {} in {} but it doesn't have supplier information recorded.",
            hit.item.name(),
            hit.source.label()
        ),
    }
}

pub fn item_details(ctx: &AnswerContext, message: &str) -> String {
    let Some(hit) = ctx.resolver().resolve(message) else {
        return format!(
            "I couldn't find an item matching \"{}\" in the inventory or orders.",
            extract_item_name(message)
        );
    };

    let mut response = format!("{} Details:\n", hit.item.name());
    match hit.item {
        ItemRef::Inventory(item) => {
            response.push_str(&format!(
                "• Quantity: {} {}\n",
                format_quantity(item.quantity),
                item.unit_or_default()
            ));
            response.push_str(&format!("• Price: {}\n", ctx.money(item.price)));
            response.push_str(&format!("• Category: {}\n", item.category_or_default()));
            if let Some(expiry) = item.expiry_date.as_deref() {
                match days_until_expiry(item, ctx.today) {
                    Some(days) => response.push_str(&format!(
                        "• Expiry: {} ({} days left)\n",
                        ctx.date(Some(expiry)),
                        days
                    )),
                    None => response.push_str(&format!("• Expiry: {}\n", expiry)),
                }
            }
        }
        ItemRef::Order(order) => {
            response.push_str(&format!("• Found in: {}\n", hit.source.label()));
            response.push_str(&format!("• Price: {}\n", ctx.money(order.price_value())));
            if let Some(date) = order.order_or_delivery_date() {
                response.push_str(&format!("• Date: {}\n", ctx.date(Some(date))));
            }
        }
    }

    if let Some(supplier) = hit.item.supplier() {
        response.push_str(&format!("• Supplier: {}", supplier));
    }
    response
}
