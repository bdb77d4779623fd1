//! Which events make up each competition, in the order they are contested.

use crate::scoring::{Event, EventType, ResultKind};
use crate::units::UnitSystem;

/// One slot in a competition's program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSpec {
    pub event: Event,
    /// Example result shown as an input hint (metric)
    pub placeholder: &'static str,
    /// Competition day, for two-day competitions
    pub day: Option<u8>,
}

impl EventSpec {
    const fn new(event: Event, placeholder: &'static str, day: Option<u8>) -> Self {
        Self { event, placeholder, day }
    }

    pub fn name(&self) -> &'static str {
        self.event.name()
    }

    pub fn kind(&self) -> ResultKind {
        self.event.kind()
    }

    /// Unit label for the result column
    pub fn display_unit(&self, units: UnitSystem) -> &'static str {
        unit_label(self.kind(), units)
    }
}

/// Unit a result of `kind` is entered and shown in
pub fn unit_label(kind: ResultKind, units: UnitSystem) -> &'static str {
    match kind {
        ResultKind::Time => "seconds",
        ResultKind::Measurement => match units {
            UnitSystem::Metric => "meters",
            UnitSystem::Imperial => "feet",
        },
    }
}

const DECATHLON: [EventSpec; 10] = [
    EventSpec::new(Event::Sprint100, "10.45", Some(1)),
    EventSpec::new(Event::LongJump, "7.50", Some(1)),
    EventSpec::new(Event::ShotPut, "16.20", Some(1)),
    EventSpec::new(Event::HighJump, "2.10", Some(1)),
    EventSpec::new(Event::Sprint400, "48.25", Some(1)),
    EventSpec::new(Event::Hurdles110, "13.80", Some(2)),
    EventSpec::new(Event::Discus, "48.50", Some(2)),
    EventSpec::new(Event::PoleVault, "5.20", Some(2)),
    EventSpec::new(Event::Javelin, "65.40", Some(2)),
    EventSpec::new(Event::Run1500, "4:25.50", Some(2)),
];

const HEPTATHLON: [EventSpec; 7] = [
    EventSpec::new(Event::Hurdles100, "13.24", Some(1)),
    EventSpec::new(Event::HighJump, "1.85", Some(1)),
    EventSpec::new(Event::ShotPut, "14.50", Some(1)),
    EventSpec::new(Event::Sprint200, "23.45", Some(1)),
    EventSpec::new(Event::LongJump, "6.50", Some(2)),
    EventSpec::new(Event::Javelin, "55.20", Some(2)),
    EventSpec::new(Event::Run800, "2:10.50", Some(2)),
];

const PENTATHLON: [EventSpec; 5] = [
    EventSpec::new(Event::Hurdles100, "13.24", None),
    EventSpec::new(Event::HighJump, "1.85", None),
    EventSpec::new(Event::ShotPut, "14.50", None),
    EventSpec::new(Event::Sprint200, "23.45", None),
    EventSpec::new(Event::Run800, "2:10.50", None),
];

/// Ordered program for a competition type
pub fn events_for(event_type: EventType) -> &'static [EventSpec] {
    match event_type {
        EventType::Decathlon => &DECATHLON,
        EventType::Heptathlon => &HEPTATHLON,
        EventType::Pentathlon => &PENTATHLON,
    }
}

/// Find an event in a program by name (case-insensitive)
pub fn find_event(event_type: EventType, name: &str) -> Option<(usize, &'static EventSpec)> {
    events_for(event_type)
        .iter()
        .enumerate()
        .find(|(_, spec)| spec.name().eq_ignore_ascii_case(name.trim()))
}
