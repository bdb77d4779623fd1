use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use super::types::{EventResult, NewPerformance, Performance};
use crate::events::{events_for, find_event, unit_label};
use crate::scoring::{EventType, ResultKind, ScoringEngine};
use crate::units::{parse_time_to_seconds, UnitSystem};

/// Editable set of results for one competition.
///
/// Result and points are two-way bound: typing a result re-derives its
/// points, typing points replaces the result with an estimate. Re-scoring
/// that estimate can land a point away from what was typed, because the
/// estimate is rounded to hundredths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSheet {
    pub event_type: EventType,
    pub results: Vec<EventResult>,
    #[serde(default)]
    pub label: Option<String>,
}

impl ScoreSheet {
    /// Blank sheet with one empty entry per event of the competition
    pub fn new(event_type: EventType, units: UnitSystem) -> Self {
        let results = events_for(event_type)
            .iter()
            .map(|spec| EventResult {
                event: spec.event,
                result: String::new(),
                points: 0,
                kind: spec.kind(),
                unit: spec.display_unit(units).to_string(),
                day: spec.day,
            })
            .collect();

        Self {
            event_type,
            results,
            label: None,
        }
    }

    /// Reopen a saved performance for editing
    pub fn from_performance(performance: &Performance) -> Self {
        Self {
            event_type: performance.event_type,
            results: performance.event_results.clone(),
            label: performance.label.clone(),
        }
    }

    /// Store a raw result and re-score it. The entry's unit label follows
    /// `units`, so a sheet reopened under other units stays readable.
    /// Returns the new points, or None if `index` is out of range.
    pub fn set_result(
        &mut self,
        index: usize,
        raw: &str,
        engine: &ScoringEngine,
        units: UnitSystem,
    ) -> Option<u32> {
        let event_type = self.event_type;
        let entry = self.results.get_mut(index)?;

        entry.result = raw.to_string();
        entry.unit = unit_label(entry.kind, units).to_string();
        entry.points = if raw.trim().is_empty() {
            0
        } else {
            let scoreable = match entry.kind {
                ResultKind::Time => raw.to_string(),
                ResultKind::Measurement => units.measurement_to_metric(raw),
            };
            engine.score(event_type, entry.event, &scoreable)
        };

        Some(entry.points)
    }

    /// Set a result by event name instead of position
    pub fn set_result_by_name(
        &mut self,
        name: &str,
        raw: &str,
        engine: &ScoringEngine,
        units: UnitSystem,
    ) -> Result<u32> {
        let Some((index, _)) = find_event(self.event_type, name) else {
            bail!("{} has no event named '{}'", self.event_type.title(), name.trim());
        };
        // Index comes from the same catalog the sheet was built from
        Ok(self.set_result(index, raw, engine, units).unwrap_or(0))
    }

    /// Store points directly and replace the result with the estimate for
    /// them. Zero points, or an estimate that is not a usable result, leave
    /// the result empty. Returns the new result text, or None if `index` is
    /// out of range.
    pub fn set_points(
        &mut self,
        index: usize,
        points: u32,
        engine: &ScoringEngine,
        units: UnitSystem,
    ) -> Option<&str> {
        let event_type = self.event_type;
        let entry = self.results.get_mut(index)?;

        entry.points = points;
        entry.unit = unit_label(entry.kind, units).to_string();
        entry.result = if points == 0 {
            String::new()
        } else {
            let estimate = engine.estimate(event_type, entry.event, points);
            if parse_time_to_seconds(&estimate) > 0.0 {
                match entry.kind {
                    ResultKind::Time => estimate,
                    ResultKind::Measurement => units.measurement_from_metric(&estimate),
                }
            } else {
                String::new()
            }
        };

        Some(entry.result.as_str())
    }

    /// Sum of all event points, saturating at `u32::MAX`
    pub fn total(&self) -> u32 {
        self.results.iter().fold(0u32, |sum, r| sum.saturating_add(r.points))
    }

    /// Points per competition day, in day order. Empty for single-day events.
    pub fn day_subtotals(&self) -> Vec<(u8, u32)> {
        let mut subtotals: Vec<(u8, u32)> = Vec::new();
        for result in &self.results {
            let Some(day) = result.day else { continue };
            match subtotals.iter_mut().find(|(d, _)| *d == day) {
                Some((_, sum)) => *sum = sum.saturating_add(result.points),
                None => subtotals.push((day, result.points)),
            }
        }
        subtotals.sort_by_key(|(day, _)| *day);
        subtotals
    }

    /// Number of events with a result entered
    pub fn completed(&self) -> usize {
        self.results.iter().filter(|r| !r.result.trim().is_empty()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Turn the sheet into a record ready for the store. A sheet without any
    /// points is refused.
    pub fn into_new_performance(self) -> Result<NewPerformance> {
        if self.is_empty() {
            bail!("Enter at least one scoring result before saving");
        }
        Ok(NewPerformance {
            event_type: self.event_type,
            event_results: self.results,
            label: self.label,
        })
    }
}
