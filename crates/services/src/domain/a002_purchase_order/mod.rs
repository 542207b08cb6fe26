pub mod repository;
pub mod service;
pub mod snapshot;

pub use snapshot::OrdersSnapshot;
