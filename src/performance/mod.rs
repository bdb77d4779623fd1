pub mod sheet;
pub mod store;
pub mod types;

pub use sheet::ScoreSheet;
pub use store::{get_store_path, load_store, save_store, PerformanceStore};
pub use types::{EventResult, NewPerformance, Performance};
