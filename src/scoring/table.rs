use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Multi-event competition type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Decathlon,
    Heptathlon,
    Pentathlon,
}

impl EventType {
    pub const ALL: [EventType; 3] = [
        EventType::Decathlon,
        EventType::Heptathlon,
        EventType::Pentathlon,
    ];

    /// Lowercase key used in tables, config files and the CLI
    pub fn key(&self) -> &'static str {
        match self {
            EventType::Decathlon => "decathlon",
            EventType::Heptathlon => "heptathlon",
            EventType::Pentathlon => "pentathlon",
        }
    }

    /// Capitalized name for display
    pub fn title(&self) -> &'static str {
        match self {
            EventType::Decathlon => "Decathlon",
            EventType::Heptathlon => "Heptathlon",
            EventType::Pentathlon => "Pentathlon",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for EventType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        EventType::ALL
            .into_iter()
            .find(|t| t.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown event type '{}' (expected decathlon, heptathlon or pentathlon)",
                    s
                )
            })
    }
}

/// Whether a result is a time (lower is better) or a distance/height
/// (higher is better).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Time,
    Measurement,
}

impl fmt::Display for ResultKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultKind::Time => f.write_str("time"),
            ResultKind::Measurement => f.write_str("measurement"),
        }
    }
}

/// Individual discipline inside a multi-event competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Event {
    #[serde(rename = "100m")]
    Sprint100,
    #[serde(rename = "200m")]
    Sprint200,
    #[serde(rename = "400m")]
    Sprint400,
    #[serde(rename = "800m")]
    Run800,
    #[serde(rename = "1500m")]
    Run1500,
    #[serde(rename = "100m Hurdles")]
    Hurdles100,
    #[serde(rename = "110m Hurdles")]
    Hurdles110,
    #[serde(rename = "Long Jump")]
    LongJump,
    #[serde(rename = "High Jump")]
    HighJump,
    #[serde(rename = "Pole Vault")]
    PoleVault,
    #[serde(rename = "Shot Put")]
    ShotPut,
    #[serde(rename = "Discus")]
    Discus,
    #[serde(rename = "Javelin")]
    Javelin,
}

impl Event {
    pub const ALL: [Event; 13] = [
        Event::Sprint100,
        Event::Sprint200,
        Event::Sprint400,
        Event::Run800,
        Event::Run1500,
        Event::Hurdles100,
        Event::Hurdles110,
        Event::LongJump,
        Event::HighJump,
        Event::PoleVault,
        Event::ShotPut,
        Event::Discus,
        Event::Javelin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Event::Sprint100 => "100m",
            Event::Sprint200 => "200m",
            Event::Sprint400 => "400m",
            Event::Run800 => "800m",
            Event::Run1500 => "1500m",
            Event::Hurdles100 => "100m Hurdles",
            Event::Hurdles110 => "110m Hurdles",
            Event::LongJump => "Long Jump",
            Event::HighJump => "High Jump",
            Event::PoleVault => "Pole Vault",
            Event::ShotPut => "Shot Put",
            Event::Discus => "Discus",
            Event::Javelin => "Javelin",
        }
    }

    pub fn kind(&self) -> ResultKind {
        match self {
            Event::Sprint100
            | Event::Sprint200
            | Event::Sprint400
            | Event::Run800
            | Event::Run1500
            | Event::Hurdles100
            | Event::Hurdles110 => ResultKind::Time,
            Event::LongJump
            | Event::HighJump
            | Event::PoleVault
            | Event::ShotPut
            | Event::Discus
            | Event::Javelin => ResultKind::Measurement,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Event {
    type Err = anyhow::Error;

    /// Case-insensitive match on the display name ("long jump", "110M HURDLES")
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Event::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Unknown event '{}'", s))
    }
}

/// Unit a formula is calibrated in. Jumps and the vault use centimeters
/// even though results are entered in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormulaUnit {
    #[serde(rename = "meters")]
    Meters,
    #[serde(rename = "cm")]
    Centimeters,
    #[serde(rename = "seconds")]
    Seconds,
}

impl FormulaUnit {
    /// The result kind this unit can score
    pub fn kind(&self) -> ResultKind {
        match self {
            FormulaUnit::Seconds => ResultKind::Time,
            FormulaUnit::Meters | FormulaUnit::Centimeters => ResultKind::Measurement,
        }
    }
}

/// Points formula for one event.
///
/// Track: `points = A * (B - T)^C`. Field: `points = A * (M - B)^C`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoringFormula {
    /// Scale coefficient
    #[serde(rename = "A")]
    pub a: f64,
    /// Baseline: the time or measurement worth zero points
    #[serde(rename = "B")]
    pub b: f64,
    /// Curvature exponent
    #[serde(rename = "C")]
    pub c: f64,
    pub unit: FormulaUnit,
}

impl ScoringFormula {
    pub const fn new(a: f64, b: f64, c: f64, unit: FormulaUnit) -> Self {
        Self { a, b, c, unit }
    }
}

/// Formulas for every event of every competition type.
///
/// Built once at startup and handed to the engine; nothing mutates it
/// afterwards.
///
/// Example YAML:
/// ```yaml
/// decathlon:
///   100m: { A: 25.4347, B: 18, C: 1.81, unit: seconds }
///   Long Jump: { A: 0.14354, B: 220, C: 1.4, unit: cm }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoringTable {
    tables: BTreeMap<EventType, BTreeMap<Event, ScoringFormula>>,
}

impl ScoringTable {
    pub fn new(tables: BTreeMap<EventType, BTreeMap<Event, ScoringFormula>>) -> Self {
        Self { tables }
    }

    /// World Athletics multi-event coefficients.
    pub fn world_athletics() -> Self {
        use Event::*;
        use FormulaUnit::*;

        let decathlon = [
            (Sprint100, ScoringFormula::new(25.4347, 18.0, 1.81, Seconds)),
            (LongJump, ScoringFormula::new(0.14354, 220.0, 1.4, Centimeters)),
            (ShotPut, ScoringFormula::new(51.39, 1.5, 1.05, Meters)),
            (HighJump, ScoringFormula::new(0.8465, 75.0, 1.42, Centimeters)),
            (Sprint400, ScoringFormula::new(1.53775, 82.0, 1.81, Seconds)),
            (Hurdles110, ScoringFormula::new(5.74352, 28.5, 1.92, Seconds)),
            (Discus, ScoringFormula::new(12.91, 4.0, 1.1, Meters)),
            (PoleVault, ScoringFormula::new(0.2797, 100.0, 1.35, Centimeters)),
            (Javelin, ScoringFormula::new(10.14, 7.0, 1.08, Meters)),
            (Run1500, ScoringFormula::new(0.03768, 480.0, 1.85, Seconds)),
        ];

        let heptathlon = [
            (Hurdles100, ScoringFormula::new(9.23076, 26.7, 1.835, Seconds)),
            (HighJump, ScoringFormula::new(1.84523, 75.0, 1.348, Centimeters)),
            (ShotPut, ScoringFormula::new(56.0211, 1.5, 1.05, Meters)),
            (Sprint200, ScoringFormula::new(4.99087, 42.5, 1.81, Seconds)),
            (LongJump, ScoringFormula::new(0.188807, 210.0, 1.41, Centimeters)),
            (Javelin, ScoringFormula::new(15.9803, 3.8, 1.04, Meters)),
            (Run800, ScoringFormula::new(0.11193, 254.0, 1.88, Seconds)),
        ];

        // Pentathlon reuses the heptathlon coefficients for its five events
        let pentathlon: BTreeMap<Event, ScoringFormula> = heptathlon
            .iter()
            .filter(|(e, _)| matches!(e, Hurdles100 | HighJump | ShotPut | Sprint200 | Run800))
            .copied()
            .collect();

        let mut tables = BTreeMap::new();
        tables.insert(EventType::Decathlon, decathlon.into_iter().collect());
        tables.insert(EventType::Heptathlon, heptathlon.into_iter().collect());
        tables.insert(EventType::Pentathlon, pentathlon);

        Self { tables }
    }

    /// Formula for an event, or None if the competition does not contain it.
    pub fn lookup(&self, event_type: EventType, event: Event) -> Option<&ScoringFormula> {
        self.tables.get(&event_type)?.get(&event)
    }

    /// All formulas of one competition type
    pub fn formulas(&self, event_type: EventType) -> impl Iterator<Item = (Event, &ScoringFormula)> {
        self.tables
            .get(&event_type)
            .into_iter()
            .flat_map(|events| events.iter().map(|(e, f)| (*e, f)))
    }

    /// Every (type, event, formula) triple, for validation
    pub fn iter(&self) -> impl Iterator<Item = (EventType, Event, &ScoringFormula)> {
        self.tables
            .iter()
            .flat_map(|(t, events)| events.iter().map(move |(e, f)| (*t, *e, f)))
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::world_athletics()
    }
}
