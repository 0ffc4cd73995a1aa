pub mod dto;
pub mod history;
pub mod recorder;
pub mod storage;
