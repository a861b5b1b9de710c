pub mod codecs;
pub mod storage;
