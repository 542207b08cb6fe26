pub mod d400_inventory_analytics;

pub use d400_inventory_analytics::ui::AnalyticsDashboard;
