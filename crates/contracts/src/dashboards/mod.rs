pub mod d400_inventory_analytics;
