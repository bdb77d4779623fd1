use super::{parse_leading_float, parse_leading_int};

const CENTIS_PER_MINUTE: f64 = 6000.0;

/// Parse a race time into seconds.
///
/// Accepts plain seconds ("10.45") or minutes and seconds ("2:10.50").
/// A segment that does not parse counts as zero, so "abc" and "" yield 0.0,
/// as does anything with more than one ':'.
pub fn parse_time_to_seconds(time: &str) -> f64 {
    let parts: Vec<&str> = time.split(':').collect();

    match parts.as_slice() {
        [seconds] => parse_leading_float(seconds).unwrap_or(0.0),
        [minutes, seconds] => {
            let minutes = parse_leading_int(minutes).unwrap_or(0.0);
            let seconds = parse_leading_float(seconds).unwrap_or(0.0);
            minutes * 60.0 + seconds
        }
        _ => 0.0,
    }
}

/// Format seconds as "SS.CC" under a minute, "M:SS.CC" otherwise.
///
/// The value is rounded to hundredths before choosing the layout, so 59.996
/// becomes "1:00.00" rather than "60.00". Non-finite input is rendered as-is
/// ("NaN", "inf").
pub fn format_seconds_as_time(seconds: f64) -> String {
    if !seconds.is_finite() {
        return format!("{:.2}", seconds);
    }

    let centis = (seconds * 100.0).round();
    if centis < CENTIS_PER_MINUTE {
        return format!("{:.2}", centis / 100.0);
    }

    let minutes = (centis / CENTIS_PER_MINUTE).floor();
    let remainder = (centis - minutes * CENTIS_PER_MINUTE) / 100.0;
    format!("{}:{:05.2}", minutes as u64, remainder)
}
