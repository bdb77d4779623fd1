pub mod log;
pub mod rules;

pub use log::{get_log_path, load_log, save_log, AchievementLog, UnlockedAchievement};
pub use rules::{definition, is_met, AchievementDefinition, AchievementKind, DEFINITIONS};
