use super::storage::KeyValueStorage;
use contracts::shared::storage_keys::APP_CONFIG;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub assistant: AssistantConfig,
    pub inventory: InventoryConfig,
    pub analytics: AnalyticsConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AssistantConfig {
    /// First AI message of every new conversation
    pub greeting: String,
    pub chat_currency_decimals: u8,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct InventoryConfig {
    /// Quantity at or below which an item counts as low stock
    pub low_stock_threshold: f64,
    /// Horizon of "expiring soon" (chat report, dashboard)
    pub expiry_window_days: i64,
    pub critical_days: i64,
    pub warning_days: i64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AnalyticsConfig {
    pub currency_decimals: u8,
    pub insight_expiry_days: i64,
    pub recent_order_days: i64,
}

const DEFAULT_GREETING: &str = "Hello! I'm your RestroTrack AI Assistant. I can help you with inventory, orders, expiry tracking, and analytics. What would you like to know?";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[assistant]
greeting = "Hello! I'm your RestroTrack AI Assistant. I can help you with inventory, orders, expiry tracking, and analytics. What would you like to know?"
chat_currency_decimals = 0

[inventory]
low_stock_threshold = 10.0
expiry_window_days = 7
critical_days = 2
warning_days = 4

[analytics]
currency_decimals = 2
insight_expiry_days = 30
recent_order_days = 7
"#;

impl Default for Config {
    /// Same values as `DEFAULT_CONFIG`, without parsing
    fn default() -> Self {
        Config {
            assistant: AssistantConfig {
                greeting: DEFAULT_GREETING.to_string(),
                chat_currency_decimals: 0,
            },
            inventory: InventoryConfig {
                low_stock_threshold: 10.0,
                expiry_window_days: 7,
                critical_days: 2,
                warning_days: 4,
            },
            analytics: AnalyticsConfig {
                currency_decimals: 2,
                insight_expiry_days: 30,
                recent_order_days: 7,
            },
        }
    }
}

/// Load configuration
///
/// Search order:
/// 1. TOML stored under the `appConfig` key
/// 2. Falls back to embedded default config
pub fn load_config(storage: &dyn KeyValueStorage) -> anyhow::Result<Config> {
    if let Some(contents) = storage.get_item(APP_CONFIG)? {
        match toml::from_str::<Config>(&contents) {
            Ok(config) => {
                tracing::info!("Loading config from storage key '{}'", APP_CONFIG);
                return Ok(config);
            }
            Err(e) => {
                tracing::warn!("Invalid config under '{}': {}", APP_CONFIG, e);
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::storage::MemoryStorage;

    #[test]
    fn test_default_config_loads() {
        let config: Result<Config, _> = toml::from_str(DEFAULT_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.inventory.low_stock_threshold, 10.0);
        assert_eq!(config.assistant.chat_currency_decimals, 0);
        assert_eq!(config.analytics.currency_decimals, 2);
        assert!(config.assistant.greeting.starts_with("Hello! I'm your RestroTrack"));
        assert_eq!(Config::default(), config);
    }

    #[test]
    fn test_override_from_storage() {
        let custom = DEFAULT_CONFIG.replace("low_stock_threshold = 10.0", "low_stock_threshold = 3.0");
        let storage = MemoryStorage::with_items([(APP_CONFIG, custom)]);
        let config = load_config(&storage).unwrap();
        assert_eq!(config.inventory.low_stock_threshold, 3.0);
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let storage = MemoryStorage::with_items([(APP_CONFIG, "[assistant")]);
        let config = load_config(&storage).unwrap();
        assert_eq!(config, Config::default());
    }
}
