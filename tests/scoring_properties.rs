//! Property tests for the scoring transform.
//!
//! - track points fall as times rise, field points rise with distance
//! - estimating a result and re-scoring it lands within a point
//! - unknown events and garbage input collapse to zero

use multi_smackdown::scoring::{Event, EventType, FormulaUnit, ResultKind, ScoringEngine};
use proptest::prelude::*;

/// Time in hundredths rendered the way a user types it
fn as_time(hundredths: u32) -> String {
    format!("{}.{:02}", hundredths / 100, hundredths % 100)
}

/// Unrounded formula value, for properties rounding would flatten
fn raw_points(engine: &ScoringEngine, event_type: EventType, event: Event, value: f64) -> f64 {
    let formula = engine
        .table()
        .lookup(event_type, event)
        .expect("formula present");
    match event.kind() {
        ResultKind::Time => formula.a * (formula.b - value).powf(formula.c),
        ResultKind::Measurement => formula.a * (value - formula.b).powf(formula.c),
    }
}

/// Events whose two-decimal estimate is fine enough to re-score within a point
fn arb_round_trip_event() -> impl Strategy<Value = (EventType, Event)> {
    prop_oneof![
        Just((EventType::Decathlon, Event::Run1500)),
        Just((EventType::Decathlon, Event::ShotPut)),
        Just((EventType::Decathlon, Event::Discus)),
        Just((EventType::Decathlon, Event::Javelin)),
        Just((EventType::Heptathlon, Event::Run800)),
        Just((EventType::Heptathlon, Event::Javelin)),
        Just((EventType::Pentathlon, Event::Run800)),
    ]
}

fn arb_field_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::LongJump),
        Just(Event::ShotPut),
        Just(Event::HighJump),
        Just(Event::Discus),
        Just(Event::PoleVault),
        Just(Event::Javelin),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: any 100m time under 17.88s is worth something
    #[test]
    fn prop_sprint_points_positive(hundredths in 1u32..1788) {
        let engine = ScoringEngine::default();
        let points = engine.calculate_points("decathlon", "100m", &as_time(hundredths), ResultKind::Time);
        prop_assert!(points > 0, "{} scored 0", as_time(hundredths));
    }

    /// Property: a slower 100m never scores more
    #[test]
    fn prop_sprint_points_non_increasing(hundredths in 1u32..1799) {
        let engine = ScoringEngine::default();
        let faster = engine.score(EventType::Decathlon, Event::Sprint100, &as_time(hundredths));
        let slower = engine.score(EventType::Decathlon, Event::Sprint100, &as_time(hundredths + 1));
        prop_assert!(faster >= slower, "{} -> {}, {} -> {}", as_time(hundredths), faster, as_time(hundredths + 1), slower);
    }

    /// Property: the unrounded 100m formula is strictly decreasing below 18s
    #[test]
    fn prop_sprint_formula_strictly_decreasing(hundredths in 1u32..1799) {
        let engine = ScoringEngine::default();
        let t = f64::from(hundredths) / 100.0;
        let here = raw_points(&engine, EventType::Decathlon, Event::Sprint100, t);
        let next = raw_points(&engine, EventType::Decathlon, Event::Sprint100, t + 0.01);
        prop_assert!(here > next);
    }

    /// Property: beyond the baseline, a longer mark never scores less
    #[test]
    fn prop_field_points_increasing(event in arb_field_event(), centimeters in 1u32..9000) {
        let engine = ScoringEngine::default();
        let formula = *engine.table().lookup(EventType::Decathlon, event).expect("decathlon event");
        let scale = if formula.unit == FormulaUnit::Centimeters { 100.0 } else { 1.0 };
        // Start just past the baseline, expressed in meters
        let base = formula.b / scale;
        let m = base + f64::from(centimeters) / 100.0;

        let shorter = engine.score(EventType::Decathlon, event, &format!("{:.2}", m));
        let longer = engine.score(EventType::Decathlon, event, &format!("{:.2}", m + 0.01));
        prop_assert!(longer >= shorter);

        let raw_here = raw_points(&engine, EventType::Decathlon, event, m * scale);
        let raw_next = raw_points(&engine, EventType::Decathlon, event, (m + 0.01) * scale);
        prop_assert!(raw_next > raw_here);
    }

    /// Property: estimate then re-score lands within one point
    #[test]
    fn prop_estimate_round_trip((event_type, event) in arb_round_trip_event(), points in 300u32..1100) {
        let engine = ScoringEngine::default();
        let estimate = engine.estimate(event_type, event, points);
        prop_assert!(!estimate.is_empty());

        let rescored = engine.score(event_type, event, &estimate);
        prop_assert!(
            rescored.abs_diff(points) <= 1,
            "{} {} points -> {} -> {} points", event, points, estimate, rescored
        );
    }

    /// Property: input with no leading number scores zero
    #[test]
    fn prop_garbage_measurement_scores_zero(text in "[a-zA-Z ]{0,12}") {
        let engine = ScoringEngine::default();
        prop_assert_eq!(engine.calculate_points("decathlon", "Discus", &text, ResultKind::Measurement), 0);
    }

    /// Property: names outside the competition never score
    #[test]
    fn prop_unknown_event_scores_zero(result in "[0-9]{1,2}\\.[0-9]{2}") {
        let engine = ScoringEngine::default();
        prop_assert_eq!(engine.calculate_points("decathlon", "Triple Jump", &result, ResultKind::Measurement), 0);
        prop_assert_eq!(engine.calculate_points("octathlon", "100m", &result, ResultKind::Time), 0);
        prop_assert_eq!(engine.estimate_result("decathlon", "Triple Jump", 800, ResultKind::Measurement), "");
    }
}

#[test]
fn test_pinned_reference_scores() {
    let engine = ScoringEngine::default();
    assert_eq!(engine.calculate_points("decathlon", "100m", "10.45", ResultKind::Time), 987);
    assert_eq!(engine.calculate_points("decathlon", "Long Jump", "7.50", ResultKind::Measurement), 935);
    assert_eq!(engine.calculate_points("heptathlon", "800m", "2:10.50", ResultKind::Time), 958);
    assert_eq!(engine.calculate_points("decathlon", "100m", "0:00.00", ResultKind::Time), 0);
    assert_eq!(engine.calculate_points("decathlon", "Shot Put", "not-a-number", ResultKind::Measurement), 0);
}
