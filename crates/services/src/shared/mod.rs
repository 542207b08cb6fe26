pub mod config;
pub mod confirmation;
pub mod date_utils;
pub mod format;
pub mod storage;

#[cfg(test)]
pub(crate) mod test_support;
