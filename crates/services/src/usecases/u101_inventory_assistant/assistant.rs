use super::intents::{matching_intents, Intent};
use super::item_answers;
use super::order_queries::process_order_query;
use super::reports::{self, AnswerContext, HELP_MESSAGE};
use crate::domain::a001_inventory_item::repository as inventory_repository;
use crate::domain::a002_purchase_order::OrdersSnapshot;
use crate::shared::config::Config;
use crate::shared::date_utils;
use crate::shared::storage::KeyValueStorage;
use chrono::NaiveDate;

/// Единственный ответ пользователю при внутренней ошибке
pub const GENERIC_ERROR_MESSAGE: &str =
    "I encountered an error while processing your request. Please try again or ask a different question.";

/// Rule-based assistant over the inventory and orders in storage.
///
/// Every call re-reads both collections; nothing is cached between messages.
pub struct InventoryAssistant<'a> {
    storage: &'a dyn KeyValueStorage,
    config: Config,
    today: NaiveDate,
}

impl<'a> InventoryAssistant<'a> {
    pub fn new(storage: &'a dyn KeyValueStorage, config: Config) -> Self {
        Self {
            storage,
            config,
            today: date_utils::today(),
        }
    }

    /// Зафиксировать "сегодня" (тесты, пересчёт на другую дату)
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = today;
        self
    }

    /// Answer a message. Never fails: internal errors become a generic retry message.
    pub fn process(&self, message: &str) -> String {
        match self.try_process(message) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!("Error processing message: {:#}", e);
                GENERIC_ERROR_MESSAGE.to_string()
            }
        }
    }

    fn try_process(&self, message: &str) -> anyhow::Result<String> {
        tracing::debug!(message, "Processing message");
        let lower = message.to_lowercase();
        let inventory = inventory_repository::load_all(self.storage)?;
        let orders = OrdersSnapshot::load(self.storage)?;

        let ctx = AnswerContext {
            inventory: &inventory,
            orders: &orders,
            today: self.today,
            limits: &self.config.inventory,
            currency_decimals: self.config.assistant.chat_currency_decimals,
        };

        for intent in matching_intents(&lower) {
            if let Some(response) = answer(&ctx, intent, message, &lower) {
                tracing::info!(?intent, "Intent answered");
                return Ok(response);
            }
            tracing::debug!(?intent, "Intent declined, trying next rule");
        }
        Ok(HELP_MESSAGE.to_string())
    }
}

/// Обработчик правила; `None` только у подменю заказов
fn answer(ctx: &AnswerContext, intent: Intent, message: &str, lower: &str) -> Option<String> {
    let response = match intent {
        Intent::CategoryValueBreakdown => reports::category_value_breakdown(ctx),
        Intent::Price => item_answers::price_answer(ctx, message),
        Intent::Quantity => item_answers::quantity_answer(ctx, message),
        Intent::OrderQuery => return process_order_query(ctx, message),
        Intent::TotalInventoryValue => reports::total_inventory_value(ctx),
        Intent::TotalOrderValue => reports::total_order_value(ctx),
        Intent::Supplier => item_answers::supplier_answer(ctx, message),
        Intent::QuickQuantity => item_answers::quick_quantity_answer(ctx, message),
        Intent::AnalyticsSummary => reports::analytics_summary(ctx),
        Intent::CategoryAnalysis => reports::category_analysis(ctx),
        Intent::ItemDetails => item_answers::item_details(ctx, message),
        Intent::Expiry => reports::expiry_report(ctx, lower),
        Intent::OrderCount => reports::order_count(ctx),
        Intent::OrderStatus => reports::order_status(ctx, lower),
        Intent::InventorySummary => reports::inventory_summary(ctx),
        Intent::AnalyticsReport => reports::analytics_report(ctx),
    };
    Some(response)
}
