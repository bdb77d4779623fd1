pub mod achievements;
pub mod autosave;
pub mod config;
pub mod events;
pub mod output;
pub mod performance;
pub mod prompt;
pub mod scoring;
pub mod storage;
pub mod units;
