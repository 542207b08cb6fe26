//! Общие типы данных RestroTrack: агрегаты склада, заказов поставщикам и чатов ассистента.
//!
//! Крейт не выполняет ввода-вывода: хранилище и UI живут в `services` и `frontend`.

pub mod dashboards;
pub mod domain;
pub mod shared;
