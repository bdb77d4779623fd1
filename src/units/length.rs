use serde::{Deserialize, Serialize};

use super::parse_leading_float;

const METERS_PER_FOOT: f64 = 0.3048;

pub fn feet_to_meters(feet: f64) -> f64 {
    feet * METERS_PER_FOOT
}

pub fn meters_to_feet(meters: f64) -> f64 {
    meters / METERS_PER_FOOT
}

/// Unit system used for distances and heights the user types and reads.
/// Times are always seconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Short label for distance/height columns
    pub fn length_label(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "m",
            UnitSystem::Imperial => "ft",
        }
    }

    /// Turn a user-entered measurement into the meter string the scoring
    /// engine expects. Input that does not parse is passed through untouched
    /// so the engine's own zero-on-failure rule applies.
    pub fn measurement_to_metric(&self, raw: &str) -> String {
        match self {
            UnitSystem::Metric => raw.to_string(),
            UnitSystem::Imperial => match parse_leading_float(raw) {
                Some(feet) => feet_to_meters(feet).to_string(),
                None => raw.to_string(),
            },
        }
    }

    /// Convert an engine estimate (meters, two decimals) into display units.
    pub fn measurement_from_metric(&self, meters: &str) -> String {
        match self {
            UnitSystem::Metric => meters.to_string(),
            UnitSystem::Imperial => match meters.trim().parse::<f64>() {
                Ok(m) if m.is_finite() => format!("{:.2}", meters_to_feet(m)),
                _ => meters.to_string(),
            },
        }
    }
}
