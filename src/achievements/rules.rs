use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::performance::Performance;
use crate::scoring::EventType;

const SPECIALIST_COUNT: usize = 10;
const PERFECT_TEN_COUNT: usize = 10;
const CONSISTENCY_WINDOW: usize = 5;
const CONSISTENCY_SPREAD: u32 = 200;
const STREAK_LENGTH: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    FirstPerformance,
    ScoreMilestone5000,
    ScoreMilestone6000,
    ScoreMilestone7000,
    ScoreMilestone8000,
    EventSpecialist,
    MultiEventMaster,
    ConsistencyChampion,
    ImprovementStreak,
    PerfectTen,
}

impl fmt::Display for AchievementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(definition(*self).title)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementDefinition {
    pub kind: AchievementKind,
    pub title: &'static str,
    pub description: &'static str,
    /// Reward points granted on unlock
    pub points: u32,
}

pub const DEFINITIONS: [AchievementDefinition; 10] = [
    AchievementDefinition {
        kind: AchievementKind::FirstPerformance,
        title: "First Steps",
        description: "Record your first performance",
        points: 50,
    },
    AchievementDefinition {
        kind: AchievementKind::ScoreMilestone5000,
        title: "Rising Star",
        description: "Achieve a score of 5000+ points",
        points: 100,
    },
    AchievementDefinition {
        kind: AchievementKind::ScoreMilestone6000,
        title: "Skilled Athlete",
        description: "Achieve a score of 6000+ points",
        points: 150,
    },
    AchievementDefinition {
        kind: AchievementKind::ScoreMilestone7000,
        title: "Elite Performer",
        description: "Achieve a score of 7000+ points",
        points: 200,
    },
    AchievementDefinition {
        kind: AchievementKind::ScoreMilestone8000,
        title: "World Class",
        description: "Achieve a score of 8000+ points",
        points: 300,
    },
    AchievementDefinition {
        kind: AchievementKind::EventSpecialist,
        title: "Event Specialist",
        description: "Complete 10 performances in the same event type",
        points: 100,
    },
    AchievementDefinition {
        kind: AchievementKind::MultiEventMaster,
        title: "Multi-Event Master",
        description: "Complete performances in all three event types",
        points: 200,
    },
    AchievementDefinition {
        kind: AchievementKind::ConsistencyChampion,
        title: "Consistency Champion",
        description: "Record 5 performances with less than 200 points difference",
        points: 150,
    },
    AchievementDefinition {
        kind: AchievementKind::ImprovementStreak,
        title: "Improvement Streak",
        description: "Achieve 3 consecutive performance improvements",
        points: 100,
    },
    AchievementDefinition {
        kind: AchievementKind::PerfectTen,
        title: "Perfect Ten",
        description: "Complete 10 total performances",
        points: 150,
    },
];

pub fn definition(kind: AchievementKind) -> &'static AchievementDefinition {
    // DEFINITIONS lists the kinds in declaration order
    &DEFINITIONS[kind as usize]
}

/// Whether a rule holds.
///
/// `history` must be oldest first. `latest` is the performance just saved,
/// if any; milestone rules judge only it, otherwise any past performance
/// counts.
pub fn is_met(kind: AchievementKind, history: &[Performance], latest: Option<&Performance>) -> bool {
    match kind {
        AchievementKind::FirstPerformance => history.len() == 1,
        AchievementKind::ScoreMilestone5000 => reaches(5000, history, latest),
        AchievementKind::ScoreMilestone6000 => reaches(6000, history, latest),
        AchievementKind::ScoreMilestone7000 => reaches(7000, history, latest),
        AchievementKind::ScoreMilestone8000 => reaches(8000, history, latest),
        AchievementKind::EventSpecialist => {
            let mut counts: HashMap<EventType, usize> = HashMap::new();
            for p in history {
                *counts.entry(p.event_type).or_default() += 1;
            }
            counts.values().any(|&n| n >= SPECIALIST_COUNT)
        }
        AchievementKind::MultiEventMaster => {
            let seen: HashSet<EventType> = history.iter().map(|p| p.event_type).collect();
            EventType::ALL.iter().all(|t| seen.contains(t))
        }
        AchievementKind::ConsistencyChampion => {
            if history.len() < CONSISTENCY_WINDOW {
                return false;
            }
            let recent = &history[history.len() - CONSISTENCY_WINDOW..];
            let min = recent.iter().map(|p| p.total_score).min().unwrap_or(0);
            let max = recent.iter().map(|p| p.total_score).max().unwrap_or(0);
            max - min < CONSISTENCY_SPREAD
        }
        AchievementKind::ImprovementStreak => {
            if history.len() < STREAK_LENGTH {
                return false;
            }
            history[history.len() - STREAK_LENGTH..]
                .windows(2)
                .all(|pair| pair[0].total_score < pair[1].total_score)
        }
        AchievementKind::PerfectTen => history.len() >= PERFECT_TEN_COUNT,
    }
}

fn reaches(threshold: u32, history: &[Performance], latest: Option<&Performance>) -> bool {
    match latest {
        Some(p) => p.total_score >= threshold,
        None => history.iter().any(|p| p.total_score >= threshold),
    }
}
