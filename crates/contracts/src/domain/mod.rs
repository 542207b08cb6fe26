pub mod a001_inventory_item;
pub mod a002_purchase_order;
pub mod a003_chat_conversation;
pub mod common;
