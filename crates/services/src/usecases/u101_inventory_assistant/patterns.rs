//! Literal pattern tables of the assistant.
//!
//! Matching is done on the lower-cased message unless a comment says otherwise;
//! capture groups named `item` / `supplier` carry the extracted fragment.

use once_cell::sync::Lazy;
use regex::Regex;

fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("Invalid assistant pattern {}: {}", pattern, e))
}

/// Слова, выбрасываемые при извлечении имени позиции из произвольной фразы
pub const STOP_WORDS: &[&str] = &[
    "what", "is", "the", "of", "for", "in", "how", "many", "much", "stock", "price", "supplier",
    "who", "supplies", "supplied", "by", "value", "tell", "me", "about", "details", "info",
    "information", "and", "a", "an", "do", "we", "have", "left", "remaining", "current",
    "currently", "now", "available", "quantity", "pieces", "units", "on", "hand", "i", "want",
    "to", "know", "number", "count", "total", "all", "what's", "whats",
];

/// `[what's the] price of <item>` up to `?` or end of text (raw message, case-insensitive)
pub static PRICE_OF: Lazy<Regex> = Lazy::new(|| {
    compile(r"(?i)(?:(?:what's|what is|whats) (?:the )?)?price of (?P<item>.*?)(?:\?|$)")
});

/// Паттерны извлечения имени, в порядке приоритета (raw message, case-insensitive)
pub static ITEM_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        PRICE_OF.clone(),
        compile(r"(?i)how many (?P<item>.*?) do we have"),
        compile(r"(?i)(?:stock|inventory) of (?P<item>.*?)(?:\?|$)"),
    ]
});

/// Извлечение имени для ответа "не нашёл" в правиле количества
pub static QUANTITY_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"(?i)how many (?P<item>.*?) do we have"),
        compile(r"(?i)how many (?P<item>.*?) in stock"),
        compile(r"(?i)(?:quantity|stock) of (?P<item>.*?)(?:\?|$)"),
    ]
});

pub static SHOW_CATEGORY: Lazy<Regex> = Lazy::new(|| compile(r"show .* category"));

pub static PRICE_QUESTION: Lazy<Regex> = Lazy::new(|| compile(r"what(?:'s| is) the (?:price|cost) of"));

pub static HOW_MUCH_COST: Lazy<Regex> = Lazy::new(|| compile(r"how much (?:does|is) .* cost"));

pub static QUANTITY_QUESTION: Lazy<Regex> =
    Lazy::new(|| compile(r"how many (?P<item>.*?) (?:do we have|in stock)"));

pub static QUANTITY_OF: Lazy<Regex> =
    Lazy::new(|| compile(r"(?:quantity|stock) of (?P<item>.*?)(?:\?|$)"));

pub static INVENTORY_VALUE_QUESTION: Lazy<Regex> =
    Lazy::new(|| compile(r"what is the (?:total |)value of(?: the|) inventory"));

pub static ORDERS_VALUE_QUESTION: Lazy<Regex> =
    Lazy::new(|| compile(r"what is the (?:total |)value of(?: the|) orders"));

/// Короткие формы вопроса о количестве (одно слово)
pub static SHORT_QUANTITY: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"how many (?P<item>\w+)"),
        compile(r"quantity of (?P<item>\w+)"),
        compile(r"stock of (?P<item>\w+)"),
    ]
});

pub static EXPIRING_COUNT: Lazy<Regex> =
    Lazy::new(|| compile(r"how many (?:items are|products are) expiring"));

pub static ORDER_COUNT: Lazy<Regex> =
    Lazy::new(|| compile(r"how many orders|number of orders|count of orders"));

/// Поставщик в подменю заказов: `orders from X`, затем `X orders`.
///
/// После `'s` ожидается сразу `orders` без пробела, поэтому `amul's orders` даёт `s`:
/// так ведёт себя сохранённое приложение, поведение оставлено как есть.
pub static SUPPLIER_ORDERS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"orders from (?P<supplier>\w+)"),
        compile(r"(?P<supplier>\w+)(?:'s| )orders"),
    ]
});

/// Поставщик в обзоре заказов: `orders from X`, затем `X orders`
pub static SUPPLIER_ORDERS_OVERVIEW: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        compile(r"orders from (?P<supplier>\w+)"),
        compile(r"(?P<supplier>\w+) orders"),
    ]
});

/// First non-empty `name` capture of the first matching pattern, trimmed
pub fn first_capture(patterns: &[Regex], text: &str, name: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| capture(pattern, text, name))
}

/// Non-empty `name` capture, trimmed
pub fn capture(pattern: &Regex, text: &str, name: &str) -> Option<String> {
    let captured = pattern.captures(text)?.name(name)?.as_str();
    if captured.is_empty() {
        None
    } else {
        Some(captured.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_patterns_compile() {
        Lazy::force(&PRICE_OF);
        assert_eq!(ITEM_NAME_PATTERNS.len(), 3);
        assert_eq!(QUANTITY_NAME_PATTERNS.len(), 3);
        for regex in [
            &*SHOW_CATEGORY,
            &*PRICE_QUESTION,
            &*HOW_MUCH_COST,
            &*QUANTITY_QUESTION,
            &*QUANTITY_OF,
            &*INVENTORY_VALUE_QUESTION,
            &*ORDERS_VALUE_QUESTION,
            &*EXPIRING_COUNT,
            &*ORDER_COUNT,
        ] {
            assert!(!regex.as_str().is_empty());
        }
        assert_eq!(SHORT_QUANTITY.len() + SUPPLIER_ORDERS.len() + SUPPLIER_ORDERS_OVERVIEW.len(), 7);
    }

    #[test]
    fn test_price_capture_stops_at_question_mark() {
        assert_eq!(
            capture(&PRICE_OF, "What's the price of Coca Cola? thanks", "item").as_deref(),
            Some("Coca Cola")
        );
        assert_eq!(capture(&PRICE_OF, "price of fanta", "item").as_deref(), Some("fanta"));
        assert_eq!(capture(&PRICE_OF, "price of ?", "item"), None);
    }

    #[test]
    fn test_supplier_capture() {
        assert_eq!(
            first_capture(&SUPPLIER_ORDERS, "show amul orders", "supplier").as_deref(),
            Some("amul")
        );
        // `'s orders` не совпадает целиком, ловится `s orders`
        assert_eq!(
            first_capture(&SUPPLIER_ORDERS, "show amul's orders", "supplier").as_deref(),
            Some("s")
        );
        assert_eq!(
            first_capture(&SUPPLIER_ORDERS, "list orders from metro please", "supplier").as_deref(),
            Some("metro")
        );
    }
}
