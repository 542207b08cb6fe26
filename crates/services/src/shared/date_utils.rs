use chrono::NaiveDate;

/// Сегодняшняя дата по локальным часам
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Разобрать `YYYY-MM-DD` (время в ISO-строке игнорируется)
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let date_part = value.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Разница в календарных днях от `today` до даты; отрицательная для прошедших
pub fn days_until(value: &str, today: NaiveDate) -> Option<i64> {
    parse_date(value).map(|date| (date - today).num_days())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_support::date;

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024-03-15"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("2024-03-15T23:59:00.000Z"), Some(date(2024, 3, 15)));
        assert_eq!(parse_date("15/03/2024"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn test_days_until() {
        let today = date(2024, 3, 15);
        assert_eq!(days_until("2024-03-17", today), Some(2));
        assert_eq!(days_until("2024-03-15", today), Some(0));
        assert_eq!(days_until("2024-03-10", today), Some(-5));
        assert_eq!(days_until("soon", today), None);
    }
}
