pub mod config;
pub mod engine;
pub mod table;
pub mod validation;

pub use config::load_scoring_table;
pub use engine::{estimate_for, points_for, ScoringEngine};
pub use table::{Event, EventType, FormulaUnit, ResultKind, ScoringFormula, ScoringTable};
pub use validation::{missing_formulas, validate_table};
