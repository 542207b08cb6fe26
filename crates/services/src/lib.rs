//! UI-agnostic core of RestroTrack.
//!
//! Everything here works against the [`shared::storage::KeyValueStorage`] port,
//! so the same code runs over browser `localStorage` and over
//! [`shared::storage::MemoryStorage`] in tests.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod usecases;
