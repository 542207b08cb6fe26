//! Currency, date and number formatting shared by the assistant and the dashboards.

use super::date_utils::parse_date;
use chrono::NaiveDate;

/// Indian rupee amount with en-IN grouping: `₹1,23,456` or `₹1,234.50`.
///
/// Precision depends on the context (0 in chat, 2 in the analytics dashboard).
pub fn format_inr(amount: f64, decimals: u8) -> String {
    let amount = if amount.is_finite() { amount } else { 0.0 };
    let factor = 10f64.powi(decimals as i32);
    let rounded = (amount * factor).round() / factor;
    let negative = rounded < 0.0;

    let fixed = format!("{:.*}", decimals as usize, rounded.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (fixed.as_str(), None),
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push('₹');
    out.push_str(&group_indian(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// 1234567 -> 12,34,567
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (left, right) = rest.split_at(rest.len() - 2);
        groups.push(right);
        rest = left;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();
    format!("{},{}", groups.join(","), last_three)
}

/// `15 Mar 2024`
pub fn format_calendar_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

/// Date for chat answers: `Today`, `Yesterday`, `N days ago` within the past week,
/// otherwise the calendar form. Unparseable input is returned as is.
pub fn format_date(value: &str, today: NaiveDate) -> String {
    let Some(date) = parse_date(value) else {
        return value.to_string();
    };
    match (today - date).num_days() {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        days @ 2..=6 => format!("{} days ago", days),
        _ => format_calendar_date(date),
    }
}

/// Calendar date or `No date` for dashboard tables
pub fn format_optional_date(value: Option<&str>) -> String {
    value
        .and_then(parse_date)
        .map(format_calendar_date)
        .unwrap_or_else(|| "No date".to_string())
}

/// Quantity the way a user typed it: 15 -> `15`, 2.5 -> `2.5`
pub fn format_quantity(quantity: f64) -> String {
    format!("{}", quantity)
}

/// One decimal place: `66.7`
pub fn format_percent(value: f64) -> String {
    format!("{:.1}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::date;

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(120.0, 0), "₹120");
        assert_eq!(format_inr(1234.0, 0), "₹1,234");
        assert_eq!(format_inr(123456.0, 0), "₹1,23,456");
        assert_eq!(format_inr(12345678.0, 0), "₹1,23,45,678");
        assert_eq!(format_inr(0.0, 0), "₹0");
    }

    #[test]
    fn test_format_inr_decimals() {
        assert_eq!(format_inr(1234.5, 2), "₹1,234.50");
        assert_eq!(format_inr(99.999, 2), "₹100.00");
        assert_eq!(format_inr(2.5, 0), "₹3");
        assert_eq!(format_inr(-500.0, 0), "-₹500");
        assert_eq!(format_inr(f64::NAN, 2), "₹0.00");
    }

    #[test]
    fn test_format_date_relative() {
        let today = date(2024, 3, 15);
        assert_eq!(format_date("2024-03-15", today), "Today");
        assert_eq!(format_date("2024-03-14", today), "Yesterday");
        assert_eq!(format_date("2024-03-10", today), "5 days ago");
        assert_eq!(format_date("2024-03-01", today), "1 Mar 2024");
        assert_eq!(format_date("2024-03-17", today), "17 Mar 2024");
        assert_eq!(format_date("someday", today), "someday");
    }

    #[test]
    fn test_format_quantity_and_percent() {
        assert_eq!(format_quantity(15.0), "15");
        assert_eq!(format_quantity(2.5), "2.5");
        assert_eq!(format_percent(200.0 / 3.0), "66.7");
        assert_eq!(format_optional_date(None), "No date");
    }
}
