pub mod storage_keys;
