use crate::domain::common::lenient::{de_number, de_opt_number, de_opt_string, de_string};
use crate::domain::common::AggregateRoot;
use crate::string_aggregate_id;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// ID заказа поставщику в формате `order-<epoch-millis>-<9 символов>`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Сгенерировать новый ID для момента `now`
    pub fn generate(now: DateTime<Utc>) -> Self {
        let suffix: String = Uuid::new_v4().simple().to_string().chars().take(9).collect();
        Self(format!("order-{}-{}", now.timestamp_millis(), suffix))
    }
}

string_aggregate_id!(OrderId);

/// Статус заказа: заказ живёт в одной из двух корзин хранилища
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(alias = "pending")]
    Pending,
    #[serde(alias = "completed")]
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Completed => "Completed",
        }
    }
}

fn de_order_status<'de, D>(deserializer: D) -> Result<OrderStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let status = value.as_ref().and_then(Value::as_str).map(str::to_lowercase);
    Ok(match status.as_deref() {
        Some("completed") => OrderStatus::Completed,
        _ => OrderStatus::Pending,
    })
}

/// Корзина хранилища, в которой лежит заказ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderBucket {
    Pending,
    Completed,
}

impl OrderBucket {
    /// Статус, который соответствует корзине
    pub fn status(&self) -> OrderStatus {
        match self {
            OrderBucket::Pending => OrderStatus::Pending,
            OrderBucket::Completed => OrderStatus::Completed,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderBucket::Pending => "pending orders",
            OrderBucket::Completed => "completed orders",
        }
    }
}

/// Заказ поставщику (агрегат a002)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: OrderId,

    #[serde(default, deserialize_with = "de_string")]
    pub name: String,

    #[serde(default, deserialize_with = "de_string")]
    pub category: String,

    #[serde(default, deserialize_with = "de_number")]
    pub quantity: f64,

    #[serde(default, deserialize_with = "de_string")]
    pub unit: String,

    /// Сумма заказа; `None`, если цена не указана (такой заказ невалиден)
    #[serde(default, deserialize_with = "de_opt_number")]
    pub price: Option<f64>,

    #[serde(
        default,
        deserialize_with = "de_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub supplier: Option<String>,

    /// Ожидаемая дата поставки (YYYY-MM-DD)
    #[serde(
        default,
        deserialize_with = "de_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_date: Option<String>,

    /// Момент создания заказа (ISO 8601)
    #[serde(
        default,
        deserialize_with = "de_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_date: Option<String>,

    #[serde(
        default,
        deserialize_with = "de_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,

    /// Неизвестное значение не отбрасывает заказ; репозиторий выставляет статус по корзине
    #[serde(default, deserialize_with = "de_order_status")]
    pub status: OrderStatus,

    #[serde(default, deserialize_with = "de_opt_string")]
    pub completion_date: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Order {
    /// Заказ участвует в агрегатах, только если у него есть имя и цена
    pub fn is_valid(&self) -> bool {
        !self.name.is_empty() && self.price.is_some()
    }

    pub fn price_value(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }

    pub fn unit_or_default(&self) -> &str {
        if self.unit.is_empty() {
            "units"
        } else {
            &self.unit
        }
    }

    /// Дата поставки, а при её отсутствии — дата заказа
    pub fn delivery_or_order_date(&self) -> Option<&str> {
        self.delivery_date.as_deref().or(self.order_date.as_deref())
    }

    /// Дата заказа, а при её отсутствии — дата поставки
    pub fn order_or_delivery_date(&self) -> Option<&str> {
        self.order_date.as_deref().or(self.delivery_date.as_deref())
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Order name must not be empty".into());
        }
        match self.price {
            Some(price) if price >= 0.0 => Ok(()),
            Some(_) => Err("Order price must not be negative".into()),
            None => Err("Order price is required".into()),
        }
    }
}

impl AggregateRoot for Order {
    fn collection_name() -> &'static str {
        "orders"
    }
}

/// Данные формы нового заказа
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub name: String,
    pub category: String,
    pub quantity: f64,
    pub unit: String,
    pub price: f64,
    pub delivery_date: Option<String>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

/// Содержимое ключа `orders`: две корзины заказов
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrdersStore {
    #[serde(default)]
    pub pending: Vec<Order>,
    #[serde(default)]
    pub completed: Vec<Order>,
}

impl OrdersStore {
    pub fn bucket(&self, bucket: OrderBucket) -> &Vec<Order> {
        match bucket {
            OrderBucket::Pending => &self.pending,
            OrderBucket::Completed => &self.completed,
        }
    }

    pub fn bucket_mut(&mut self, bucket: OrderBucket) -> &mut Vec<Order> {
        match bucket {
            OrderBucket::Pending => &mut self.pending,
            OrderBucket::Completed => &mut self.completed,
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len() + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Найти корзину и позицию заказа по ID
    pub fn locate(&self, id: &OrderId) -> Option<(OrderBucket, usize)> {
        if let Some(index) = self.pending.iter().position(|o| &o.id == id) {
            return Some((OrderBucket::Pending, index));
        }
        self.completed
            .iter()
            .position(|o| &o.id == id)
            .map(|index| (OrderBucket::Completed, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_id_format() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap();
        let id = OrderId::generate(now);
        let parts: Vec<&str> = id.0.splitn(3, '-').collect();
        assert_eq!(parts[0], "order");
        assert_eq!(parts[1], now.timestamp_millis().to_string());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_order_validity() {
        let json = r#"{"pending":[{"id":"a","name":"Milk","price":"250"},{"id":"b","name":"","price":10},{"id":"c","name":"Eggs"}],"completed":[]}"#;
        let store: OrdersStore = serde_json::from_str(json).unwrap();
        let valid: Vec<&str> = store
            .pending
            .iter()
            .filter(|o| o.is_valid())
            .map(|o| o.name.as_str())
            .collect();
        assert_eq!(valid, vec!["Milk"]);
    }

    #[test]
    fn test_unknown_status_keeps_order() {
        let json = r#"[{"name":"Paneer","price":300,"status":"Delivered"},{"name":"Rice","price":200,"status":null},{"name":"Ghee","price":90,"status":"completed"}]"#;
        let orders: Vec<Order> = serde_json::from_str(json).unwrap();
        let statuses: Vec<OrderStatus> = orders.iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![OrderStatus::Pending, OrderStatus::Pending, OrderStatus::Completed]
        );
    }

    #[test]
    fn test_completion_date_serialized_as_null() {
        let order = Order {
            id: OrderId::new("order-1-abc"),
            name: "Flour".into(),
            price: Some(500.0),
            ..Default::default()
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["status"], "Pending");
        assert!(value["completionDate"].is_null());
    }
}
