use super::table::{Event, EventType, FormulaUnit, ResultKind, ScoringFormula, ScoringTable};
use crate::units::{format_seconds_as_time, parse_leading_float, parse_time_to_seconds};

/// Converts raw results to points and points back to results.
///
/// Every failure (unknown competition or event, wrong result kind,
/// unparseable or out-of-range input) yields 0 points or an empty estimate
/// rather than an error, so callers can score on every keystroke.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    table: ScoringTable,
}

impl ScoringEngine {
    pub fn new(table: ScoringTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Points for `raw_result` in the named event, 0 when it cannot be scored.
    pub fn calculate_points(
        &self,
        event_type: &str,
        event_name: &str,
        raw_result: &str,
        kind: ResultKind,
    ) -> u32 {
        match self.resolve(event_type, event_name, kind) {
            Some(formula) => points_for(formula, raw_result, kind),
            None => 0,
        }
    }

    /// Result worth `points` in the named event, "" when the event is unknown.
    pub fn estimate_result(
        &self,
        event_type: &str,
        event_name: &str,
        points: u32,
        kind: ResultKind,
    ) -> String {
        match self.resolve(event_type, event_name, kind) {
            Some(formula) => estimate_for(formula, points, kind),
            None => String::new(),
        }
    }

    /// Typed variant of [`calculate_points`](Self::calculate_points); the
    /// result kind comes from the event itself.
    pub fn score(&self, event_type: EventType, event: Event, raw_result: &str) -> u32 {
        match self.table.lookup(event_type, event) {
            Some(formula) => points_for(formula, raw_result, event.kind()),
            None => 0,
        }
    }

    /// Typed variant of [`estimate_result`](Self::estimate_result).
    pub fn estimate(&self, event_type: EventType, event: Event, points: u32) -> String {
        match self.table.lookup(event_type, event) {
            Some(formula) => estimate_for(formula, points, event.kind()),
            None => String::new(),
        }
    }

    fn resolve(&self, event_type: &str, event_name: &str, kind: ResultKind) -> Option<&ScoringFormula> {
        let event_type: EventType = event_type.parse().ok()?;
        let event: Event = event_name.parse().ok()?;
        let formula = self.table.lookup(event_type, event)?;
        // A time can't be scored with a field formula and vice versa
        (formula.unit.kind() == kind).then_some(formula)
    }
}

/// Apply a formula to a raw result string.
pub fn points_for(formula: &ScoringFormula, raw_result: &str, kind: ResultKind) -> u32 {
    let ScoringFormula { a, b, c, unit } = *formula;

    let points = match kind {
        ResultKind::Time => {
            let seconds = parse_time_to_seconds(raw_result);
            if !seconds.is_finite() || seconds <= 0.0 {
                return 0;
            }
            a * (b - seconds).powf(c)
        }
        ResultKind::Measurement => {
            let mut measurement = match parse_leading_float(raw_result) {
                Some(m) if m.is_finite() && m > 0.0 => m,
                _ => return 0,
            };
            if unit == FormulaUnit::Centimeters {
                measurement *= 100.0;
            }
            a * (measurement - b).powf(c)
        }
    };

    clamp_points(points)
}

/// Invert a formula: the result that would score `points`.
///
/// Nothing is clamped here. At 0 points the estimate is the formula's
/// baseline, which no athlete would report as a result.
pub fn estimate_for(formula: &ScoringFormula, points: u32, kind: ResultKind) -> String {
    let ScoringFormula { a, b, c, unit } = *formula;
    let offset = (points as f64 / a).powf(1.0 / c);

    match kind {
        ResultKind::Time => format_seconds_as_time(b - offset),
        ResultKind::Measurement => {
            let mut measurement = b + offset;
            if unit == FormulaUnit::Centimeters {
                measurement /= 100.0;
            }
            format!("{:.2}", measurement)
        }
    }
}

/// Round to the nearest point, floor at zero. NaN (negative base raised to a
/// fractional power) counts as zero.
fn clamp_points(points: f64) -> u32 {
    let rounded = points.round();
    if rounded.is_nan() || rounded <= 0.0 {
        0
    } else if rounded >= u32::MAX as f64 {
        u32::MAX
    } else {
        rounded as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> ScoringEngine {
        ScoringEngine::new(ScoringTable::world_athletics())
    }

    #[test]
    fn test_decathlon_100m_reference() {
        // 25.4347 * (18 - 10.45)^1.81 = 987.44
        let points = engine().calculate_points("decathlon", "100m", "10.45", ResultKind::Time);
        assert_eq!(points, 987);
    }

    #[test]
    fn test_decathlon_long_jump_uses_centimeters() {
        // 7.50 m -> 750 cm; 0.14354 * (750 - 220)^1.4 = 935.32
        let points =
            engine().calculate_points("decathlon", "Long Jump", "7.50", ResultKind::Measurement);
        assert_eq!(points, 935);
    }

    #[test]
    fn test_heptathlon_800m_minutes_seconds() {
        // 2:10.50 -> 130.5 s; 0.11193 * (254 - 130.5)^1.88 = 957.81
        let points = engine().calculate_points("heptathlon", "800m", "2:10.50", ResultKind::Time);
        assert_eq!(points, 958);
    }

    #[test]
    fn test_decathlon_shot_put_uses_meters() {
        // 51.39 * (16.20 - 1.5)^1.05 = 864.10
        let points =
            engine().calculate_points("decathlon", "Shot Put", "16.20", ResultKind::Measurement);
        assert_eq!(points, 864);
    }

    #[test]
    fn test_unknown_event_scores_zero() {
        let e = engine();
        assert_eq!(
            e.calculate_points("decathlon", "Triple Jump", "15.00", ResultKind::Measurement),
            0
        );
        assert_eq!(e.calculate_points("triathlon", "100m", "10.45", ResultKind::Time), 0);
        assert_eq!(e.calculate_points("pentathlon", "Javelin", "40", ResultKind::Measurement), 0);
    }

    #[test]
    fn test_kind_mismatch_scores_zero() {
        let e = engine();
        assert_eq!(e.calculate_points("decathlon", "100m", "10.45", ResultKind::Measurement), 0);
        assert_eq!(e.calculate_points("decathlon", "Discus", "48.50", ResultKind::Time), 0);
    }

    #[test]
    fn test_unparseable_measurement_scores_zero() {
        let e = engine();
        assert_eq!(
            e.calculate_points("decathlon", "Discus", "not-a-number", ResultKind::Measurement),
            0
        );
        assert_eq!(e.calculate_points("decathlon", "Discus", "", ResultKind::Measurement), 0);
        assert_eq!(e.calculate_points("decathlon", "Discus", "0", ResultKind::Measurement), 0);
        assert_eq!(e.calculate_points("decathlon", "Discus", "-5", ResultKind::Measurement), 0);
    }

    #[test]
    fn test_zero_time_scores_zero() {
        let e = engine();
        assert_eq!(e.calculate_points("decathlon", "100m", "0:00.00", ResultKind::Time), 0);
        assert_eq!(e.calculate_points("decathlon", "100m", "abc", ResultKind::Time), 0);
        assert_eq!(e.calculate_points("decathlon", "100m", "", ResultKind::Time), 0);
    }

    #[test]
    fn test_slower_than_baseline_clamps_to_zero() {
        let e = engine();
        // T >= B gives a negative base; the fractional power is NaN
        assert_eq!(e.calculate_points("decathlon", "100m", "18.00", ResultKind::Time), 0);
        assert_eq!(e.calculate_points("decathlon", "100m", "25.00", ResultKind::Time), 0);
        // Below the 2.20 m baseline for the long jump
        assert_eq!(
            e.calculate_points("decathlon", "Long Jump", "2.00", ResultKind::Measurement),
            0
        );
    }

    #[test]
    fn test_lenient_input_parsing() {
        let e = engine();
        assert_eq!(
            e.calculate_points("Decathlon", "long jump", "7.50m", ResultKind::Measurement),
            935
        );
    }

    #[test]
    fn test_estimate_time_formats() {
        let e = engine();
        // 18 - (1000 / 25.4347)^(1/1.81) = 10.397
        assert_eq!(e.estimate_result("decathlon", "100m", 1000, ResultKind::Time), "10.40");
        // 254 - (1000 / 0.11193)^(1/1.88) = 127.636
        assert_eq!(e.estimate_result("heptathlon", "800m", 1000, ResultKind::Time), "2:07.64");
    }

    #[test]
    fn test_estimate_measurement_reports_meters() {
        let e = engine();
        // 220 + (1000 / 0.14354)^(1/1.4) = 775.93 cm
        assert_eq!(
            e.estimate_result("decathlon", "Long Jump", 1000, ResultKind::Measurement),
            "7.76"
        );
    }

    #[test]
    fn test_estimate_unknown_event_is_empty() {
        let e = engine();
        assert_eq!(e.estimate_result("decathlon", "Triple Jump", 900, ResultKind::Measurement), "");
        assert_eq!(e.estimate_result("decathlon", "100m", 900, ResultKind::Measurement), "");
    }

    #[test]
    fn test_estimate_zero_points_is_baseline() {
        let e = engine();
        assert_eq!(e.estimate_result("decathlon", "100m", 0, ResultKind::Time), "18.00");
        assert_eq!(e.estimate_result("decathlon", "Discus", 0, ResultKind::Measurement), "4.00");
    }

    #[test]
    fn test_typed_api_matches_string_api() {
        let e = engine();
        assert_eq!(
            e.score(EventType::Heptathlon, Event::Run800, "2:10.50"),
            e.calculate_points("heptathlon", "800m", "2:10.50", ResultKind::Time)
        );
        assert_eq!(
            e.estimate(EventType::Decathlon, Event::Javelin, 800),
            e.estimate_result("decathlon", "Javelin", 800, ResultKind::Measurement)
        );
        assert_eq!(e.score(EventType::Pentathlon, Event::Javelin, "50"), 0);
        assert_eq!(e.estimate(EventType::Pentathlon, Event::Javelin, 800), "");
    }

    #[test]
    fn test_round_trip_within_one_point() {
        let e = engine();
        let cases = [
            ("decathlon", "1500m", ResultKind::Time, 800),
            ("decathlon", "Shot Put", ResultKind::Measurement, 750),
            ("decathlon", "Discus", ResultKind::Measurement, 800),
            ("decathlon", "Javelin", ResultKind::Measurement, 700),
            ("heptathlon", "800m", ResultKind::Time, 900),
            ("heptathlon", "Javelin", ResultKind::Measurement, 850),
        ];
        for (event_type, event, kind, points) in cases {
            let estimate = e.estimate_result(event_type, event, points, kind);
            let recovered = e.calculate_points(event_type, event, &estimate, kind);
            assert!(
                (recovered as i64 - points as i64).abs() <= 1,
                "{} {}: {} -> {} -> {}",
                event_type,
                event,
                points,
                estimate,
                recovered
            );
        }
    }

    #[test]
    fn test_clamp_points() {
        assert_eq!(clamp_points(f64::NAN), 0);
        assert_eq!(clamp_points(-12.0), 0);
        assert_eq!(clamp_points(0.4), 0);
        assert_eq!(clamp_points(0.5), 1);
        assert_eq!(clamp_points(987.44), 987);
        assert_eq!(clamp_points(f64::INFINITY), u32::MAX);
    }
}
