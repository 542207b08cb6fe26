//! Rule-based inventory assistant: free text in, formatted answer out.

pub mod assistant;
pub mod chat_turn;
pub mod intents;
pub mod item_answers;
pub mod item_resolver;
pub mod order_queries;
pub mod patterns;
pub mod reports;

pub use assistant::InventoryAssistant;
pub use chat_turn::{dispatch, ChatCommand, ChatEvent};
