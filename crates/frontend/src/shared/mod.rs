pub mod export;
pub mod icons;
pub mod local_storage;
pub mod notice;
