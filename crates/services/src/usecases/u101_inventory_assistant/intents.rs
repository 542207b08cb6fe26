//! Ordered intent table. The first rule whose predicate matches the lower-cased
//! message answers; [`Intent::OrderQuery`] may decline and let later rules run.

use super::patterns::{
    EXPIRING_COUNT, HOW_MUCH_COST, INVENTORY_VALUE_QUESTION, ORDERS_VALUE_QUESTION, ORDER_COUNT,
    PRICE_QUESTION, QUANTITY_OF, QUANTITY_QUESTION, SHORT_QUANTITY, SHOW_CATEGORY,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    CategoryValueBreakdown,
    Price,
    Quantity,
    OrderQuery,
    TotalInventoryValue,
    TotalOrderValue,
    Supplier,
    QuickQuantity,
    AnalyticsSummary,
    CategoryAnalysis,
    ItemDetails,
    Expiry,
    OrderCount,
    OrderStatus,
    InventorySummary,
    AnalyticsReport,
}

pub struct IntentRule {
    pub intent: Intent,
    pub matches: fn(&str) -> bool,
}

/// Порядок важен: предикаты пересекаются
pub static INTENT_RULES: [IntentRule; 16] = [
    IntentRule { intent: Intent::CategoryValueBreakdown, matches: is_category_value_breakdown },
    IntentRule { intent: Intent::Price, matches: is_price_question },
    IntentRule { intent: Intent::Quantity, matches: is_quantity_question },
    IntentRule { intent: Intent::OrderQuery, matches: mentions_orders },
    IntentRule { intent: Intent::TotalInventoryValue, matches: is_total_inventory_value },
    IntentRule { intent: Intent::TotalOrderValue, matches: is_total_order_value },
    IntentRule { intent: Intent::Supplier, matches: is_supplier_question },
    IntentRule { intent: Intent::QuickQuantity, matches: is_short_quantity_question },
    IntentRule { intent: Intent::AnalyticsSummary, matches: is_analytics_summary },
    IntentRule { intent: Intent::CategoryAnalysis, matches: is_category_analysis },
    IntentRule { intent: Intent::ItemDetails, matches: is_details_question },
    IntentRule { intent: Intent::Expiry, matches: is_expiry_question },
    IntentRule { intent: Intent::OrderCount, matches: is_order_count },
    IntentRule { intent: Intent::OrderStatus, matches: mentions_orders },
    IntentRule { intent: Intent::InventorySummary, matches: is_inventory_summary },
    IntentRule { intent: Intent::AnalyticsReport, matches: is_analytics_report },
];

/// Intents whose predicate accepts `lower`, in priority order
pub fn matching_intents(lower: &str) -> impl Iterator<Item = Intent> + '_ {
    INTENT_RULES
        .iter()
        .filter(move |rule| (rule.matches)(lower))
        .map(|rule| rule.intent)
}

fn contains_any(lower: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| lower.contains(needle))
}

fn is_category_value_breakdown(lower: &str) -> bool {
    contains_any(lower, &["inventory value by category", "category breakdown", "value by category"])
        || (SHOW_CATEGORY.is_match(lower) && lower.contains("value"))
}

fn is_price_question(lower: &str) -> bool {
    lower.contains("price of") || PRICE_QUESTION.is_match(lower) || HOW_MUCH_COST.is_match(lower)
}

fn is_quantity_question(lower: &str) -> bool {
    QUANTITY_QUESTION.is_match(lower) || QUANTITY_OF.is_match(lower)
}

fn mentions_orders(lower: &str) -> bool {
    contains_any(lower, &["order", "delivery"])
}

fn is_total_inventory_value(lower: &str) -> bool {
    lower.contains("total inventory value")
        || INVENTORY_VALUE_QUESTION.is_match(lower)
        || lower.contains("inventory worth")
}

pub(crate) fn is_total_order_value(lower: &str) -> bool {
    lower.contains("total order value")
        || ORDERS_VALUE_QUESTION.is_match(lower)
        || lower.contains("orders worth")
}

fn is_supplier_question(lower: &str) -> bool {
    contains_any(lower, &["supplier", "who supplies", "supplied by"])
}

fn is_short_quantity_question(lower: &str) -> bool {
    SHORT_QUANTITY.iter().any(|pattern| pattern.is_match(lower))
}

fn is_analytics_summary(lower: &str) -> bool {
    contains_any(lower, &["analytics summary", "summarize analytics", "analytics overview"])
}

fn is_category_analysis(lower: &str) -> bool {
    contains_any(lower, &["category analysis", "analyze categories", "category breakdown"])
}

fn is_details_question(lower: &str) -> bool {
    contains_any(lower, &["details", "information about", "tell me about"])
}

fn is_expiry_question(lower: &str) -> bool {
    lower.contains("expir")
}

/// Просят только число истекающих позиций
pub(crate) fn is_expiry_count(lower: &str) -> bool {
    lower.contains("count") || EXPIRING_COUNT.is_match(lower)
}

pub(crate) fn is_order_count(lower: &str) -> bool {
    ORDER_COUNT.is_match(lower)
}

fn is_inventory_summary(lower: &str) -> bool {
    contains_any(lower, &["inventory summary", "summarize inventory"])
}

fn is_analytics_report(lower: &str) -> bool {
    contains_any(lower, &["analytics", "report"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(message: &str) -> Option<Intent> {
        matching_intents(&message.to_lowercase()).next()
    }

    #[test]
    fn test_priority_order() {
        assert_eq!(first("Show inventory value by category"), Some(Intent::CategoryValueBreakdown));
        assert_eq!(first("category breakdown"), Some(Intent::CategoryValueBreakdown));
        assert_eq!(first("tell me the price of paneer details"), Some(Intent::Price));
        assert_eq!(first("How many sprite do we have?"), Some(Intent::Quantity));
        assert_eq!(first("show pending orders"), Some(Intent::OrderQuery));
        assert_eq!(first("What is the value of the inventory"), Some(Intent::TotalInventoryValue));
        assert_eq!(first("who supplies pepsi"), Some(Intent::Supplier));
        assert_eq!(first("how many eggs"), Some(Intent::QuickQuantity));
        assert_eq!(first("analytics overview please"), Some(Intent::AnalyticsSummary));
        assert_eq!(first("category analysis"), Some(Intent::CategoryAnalysis));
        assert_eq!(first("tell me about sprite"), Some(Intent::ItemDetails));
        assert_eq!(first("what is expiring soon"), Some(Intent::Expiry));
        assert_eq!(first("inventory summary"), Some(Intent::InventorySummary));
        assert_eq!(first("weekly report"), Some(Intent::AnalyticsReport));
        assert_eq!(first("hello there"), None);
    }

    #[test]
    fn test_order_rules_listed_twice() {
        let intents: Vec<Intent> = matching_intents("order status").collect();
        assert_eq!(intents, vec![Intent::OrderQuery, Intent::OrderStatus]);
    }

    #[test]
    fn test_show_category_needs_value() {
        assert_eq!(first("show items by category"), None);
        assert_eq!(first("show total value per category"), Some(Intent::CategoryValueBreakdown));
    }

    #[test]
    fn test_helpers() {
        assert!(is_expiry_count("count expiring items"));
        assert!(is_expiry_count("how many items are expiring"));
        assert!(!is_expiry_count("show expiring items"));
        assert!(is_total_order_value("what is the total value of orders"));
        assert!(is_order_count("number of orders"));
    }
}
