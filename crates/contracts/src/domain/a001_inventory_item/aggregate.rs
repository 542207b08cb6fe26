use crate::domain::common::lenient::{de_number, de_opt_string, de_string};
use crate::domain::common::AggregateRoot;
use crate::string_aggregate_id;
use serde::{Deserialize, Serialize};

/// ID позиции склада (строка, сгенерированная формой добавления)
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct InventoryItemId(pub String);

impl InventoryItemId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }
}

string_aggregate_id!(InventoryItemId);

/// Позиция склада ресторана (агрегат a001)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default)]
    pub id: InventoryItemId,

    #[serde(default, deserialize_with = "de_string")]
    pub name: String,

    #[serde(default, deserialize_with = "de_string")]
    pub category: String,

    #[serde(default, deserialize_with = "de_number")]
    pub quantity: f64,

    #[serde(default, deserialize_with = "de_string")]
    pub unit: String,

    /// Стоимость позиции целиком (не цена за единицу)
    #[serde(default, deserialize_with = "de_number")]
    pub price: f64,

    /// Дата истечения срока годности (YYYY-MM-DD)
    #[serde(
        default,
        deserialize_with = "de_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub expiry_date: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub supplier: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,

    /// Поля, которые UI пишет сверх схемы (createdAt, updatedAt, ...)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl InventoryItem {
    /// Единица измерения для ответов: пустая заменяется на "units"
    pub fn unit_or_default(&self) -> &str {
        if self.unit.is_empty() {
            "units"
        } else {
            &self.unit
        }
    }

    /// Категория для группировок: пустая заменяется на "Uncategorized"
    pub fn category_or_default(&self) -> &str {
        if self.category.is_empty() {
            "Uncategorized"
        } else {
            &self.category
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Item name must not be empty".into());
        }
        if self.quantity < 0.0 {
            return Err("Quantity must not be negative".into());
        }
        if self.price < 0.0 {
            return Err("Price must not be negative".into());
        }
        Ok(())
    }
}

impl AggregateRoot for InventoryItem {
    fn collection_name() -> &'static str {
        "inventoryItems"
    }
}

/// Данные формы добавления позиции
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewInventoryItem {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub expiry_date: Option<String>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

/// Статус остатка по количеству
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    OutOfStock,
    Critical,
    Low,
    Good,
}

impl StockStatus {
    pub fn label(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Out of Stock",
            StockStatus::Critical => "Critical Stock",
            StockStatus::Low => "Low Stock",
            StockStatus::Good => "Well Stocked",
        }
    }
}

/// Уровень срочности по сроку годности (трекер сроков)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryStatus {
    Critical,
    Warning,
    Upcoming,
}

impl ExpiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryStatus::Critical => "critical",
            ExpiryStatus::Warning => "warning",
            ExpiryStatus::Upcoming => "upcoming",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::Critical => "Critical",
            ExpiryStatus::Warning => "Warning",
            ExpiryStatus::Upcoming => "Upcoming",
        }
    }
}

/// Фильтр таблицы трекера сроков
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpiryFilter {
    #[default]
    Critical,
    Warning,
    Upcoming,
    All,
}

impl ExpiryFilter {
    pub fn from_str(s: &str) -> Self {
        match s {
            "warning" => ExpiryFilter::Warning,
            "upcoming" => ExpiryFilter::Upcoming,
            "all" => ExpiryFilter::All,
            _ => ExpiryFilter::Critical,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpiryFilter::Critical => "critical",
            ExpiryFilter::Warning => "warning",
            ExpiryFilter::Upcoming => "upcoming",
            ExpiryFilter::All => "all",
        }
    }

    pub fn all() -> [ExpiryFilter; 4] {
        [
            ExpiryFilter::Critical,
            ExpiryFilter::Warning,
            ExpiryFilter::Upcoming,
            ExpiryFilter::All,
        ]
    }

    pub fn accepts(&self, status: ExpiryStatus) -> bool {
        match self {
            ExpiryFilter::All => true,
            ExpiryFilter::Critical => status == ExpiryStatus::Critical,
            ExpiryFilter::Warning => status == ExpiryStatus::Warning,
            ExpiryFilter::Upcoming => status == ExpiryStatus::Upcoming,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_form_record() {
        let json = r#"{"id":1700000000000,"createdAt":"2024-03-01T10:00:00.000Z","name":"Sprite","category":"Beverages","quantity":"15","unit":"","price":120,"expiryDate":"","supplier":null}"#;
        let item: InventoryItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.quantity, 15.0);
        assert_eq!(item.unit_or_default(), "units");
        assert_eq!(item.expiry_date, None);
        assert_eq!(item.supplier, None);
        assert_eq!(item.id.0, "1700000000000");
        assert_eq!(item.extra["createdAt"], "2024-03-01T10:00:00.000Z");
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let item = InventoryItem {
            id: InventoryItemId::new("1"),
            name: "Milk".into(),
            category: "Dairy".into(),
            quantity: 4.0,
            unit: "l".into(),
            price: 200.0,
            expiry_date: Some("2024-03-15".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["expiryDate"], "2024-03-15");
        assert!(value.get("supplier").is_none());
        assert_eq!(InventoryItem::collection_name(), "inventoryItems");
    }
}
