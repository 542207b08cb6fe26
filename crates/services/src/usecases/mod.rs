pub mod u101_inventory_assistant;
