//! Common types and traits for all aggregates

pub mod aggregate_id;
pub mod aggregate_root;
pub mod lenient;

pub use aggregate_root::AggregateRoot;
