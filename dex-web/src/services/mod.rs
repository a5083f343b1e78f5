pub mod ethereum;
pub mod storage;
