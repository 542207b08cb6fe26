pub mod a001_inventory_item;
pub mod a003_chat_conversation;
