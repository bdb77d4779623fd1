use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::rules::{is_met, AchievementDefinition, AchievementKind, DEFINITIONS};
use crate::performance::Performance;
use crate::storage::{load_state, save_state, Versioned};

const LOG_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub kind: AchievementKind,
    pub title: String,
    pub description: String,
    pub points: u32,
    pub unlocked_at: DateTime<Utc>,
}

/// Achievements unlocked so far. Each kind unlocks at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementLog {
    pub version: u32,
    #[serde(default)]
    pub unlocked: Vec<UnlockedAchievement>,
}

impl Default for AchievementLog {
    fn default() -> Self {
        Self::new()
    }
}

impl Versioned for AchievementLog {
    const VERSION: u32 = LOG_VERSION;

    fn version(&self) -> u32 {
        self.version
    }
}

impl AchievementLog {
    pub fn new() -> Self {
        Self {
            version: LOG_VERSION,
            unlocked: Vec::new(),
        }
    }

    pub fn has(&self, kind: AchievementKind) -> bool {
        self.unlocked.iter().any(|a| a.kind == kind)
    }

    /// Sum of reward points over everything unlocked
    pub fn total_points(&self) -> u32 {
        self.unlocked.iter().fold(0u32, |sum, a| sum.saturating_add(a.points))
    }

    fn unlock(&mut self, definition: &AchievementDefinition, at: DateTime<Utc>) -> UnlockedAchievement {
        let achievement = UnlockedAchievement {
            kind: definition.kind,
            title: definition.title.to_string(),
            description: definition.description.to_string(),
            points: definition.points,
            unlocked_at: at,
        };
        self.unlocked.push(achievement.clone());
        achievement
    }

    /// Evaluate every rule not yet unlocked and record the ones that now
    /// hold. Returns the newly unlocked achievements in rule order.
    ///
    /// `history` must be oldest first; `latest` is the performance just
    /// saved, if the check follows a save.
    pub fn check_and_unlock(
        &mut self,
        history: &[Performance],
        latest: Option<&Performance>,
    ) -> Vec<UnlockedAchievement> {
        let now = Utc::now();
        let mut newly = Vec::new();

        for definition in &DEFINITIONS {
            if self.has(definition.kind) {
                continue;
            }
            if is_met(definition.kind, history, latest) {
                tracing::info!(achievement = definition.title, "achievement unlocked");
                newly.push(self.unlock(definition, now));
            }
        }

        newly
    }
}

/// Achievements file inside the data directory
pub fn get_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("achievements.json")
}

pub fn load_log(path: &Path) -> anyhow::Result<AchievementLog> {
    load_state(path, "achievement log")
}

pub fn save_log(path: &Path, log: &AchievementLog) -> anyhow::Result<()> {
    save_state(path, log, "achievement log")
}
