//! Ключи localStorage, общие для сервисов и UI.
//!
//! Коллекции агрегатов адресуются через `AggregateRoot::collection_name()`;
//! здесь только ключи без собственного агрегата.

/// ID последнего открытого чата
pub const LAST_CHAT_ID: &str = "lastChatId";

/// Переопределение конфигурации в формате TOML
pub const APP_CONFIG: &str = "appConfig";
