use chrono::Duration;
use owo_colors::OwoColorize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::achievements::{AchievementLog, UnlockedAchievement};
use crate::performance::{EventResult, Performance, ScoreSheet};

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Format points with a thousands separator (8,412)
pub fn format_points(points: u32) -> String {
    let digits = points.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a duration into a human-readable age string
/// "2h ago" for hours, "3d ago" for days, "1w ago" for weeks
pub fn format_age(duration: Duration) -> String {
    let hours = duration.num_hours();
    let days = duration.num_days();
    let weeks = days / 7;

    if weeks >= 1 {
        format!("{}w ago", weeks)
    } else if days >= 1 {
        format!("{}d ago", days)
    } else if hours >= 1 {
        format!("{}h ago", hours)
    } else {
        let minutes = duration.num_minutes();
        if minutes >= 1 {
            format!("{}m ago", minutes)
        } else {
            "just now".to_string()
        }
    }
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn format_result_line(result: &EventResult, use_colors: bool) -> String {
    let shown = if result.result.trim().is_empty() {
        "-".to_string()
    } else {
        format!("{} {}", result.result, result.unit)
    };
    let name = format!("{:<14}", result.event.name());
    let shown = format!("{:<18}", shown);
    let points = format!("{:>5}", result.points);

    if use_colors {
        if result.points == 0 {
            format!("  {}{}{}", name, shown.dimmed(), points.dimmed())
        } else {
            format!("  {}{}{}", name, shown, points.bold())
        }
    } else {
        format!("  {}{}{}", name, shown, points)
    }
}

fn format_total_line(label: &str, points: u32, use_colors: bool) -> String {
    let line = format!("  {:<32}{:>5}", label, format_points(points));
    if use_colors {
        line.bold().to_string()
    } else {
        line
    }
}

/// Format a sheet of results: one line per event, day subtotals for
/// two-day competitions, then the total.
pub fn format_sheet(sheet: &ScoreSheet, use_colors: bool) -> String {
    let mut lines = Vec::new();
    let title = match &sheet.label {
        Some(label) => format!("{} - {}", sheet.event_type.title(), label),
        None => sheet.event_type.title().to_string(),
    };
    lines.push(if use_colors {
        title.bold().cyan().to_string()
    } else {
        title
    });

    let subtotals = sheet.day_subtotals();
    if subtotals.is_empty() {
        lines.extend(sheet.results.iter().map(|r| format_result_line(r, use_colors)));
    } else {
        for (day, subtotal) in subtotals {
            let header = format!(" Day {}", day);
            lines.push(if use_colors {
                header.yellow().to_string()
            } else {
                header
            });
            lines.extend(
                sheet
                    .results
                    .iter()
                    .filter(|r| r.day == Some(day))
                    .map(|r| format_result_line(r, use_colors)),
            );
            lines.push(format!("  {:<32}{:>5}", format!("Day {} subtotal", day), subtotal));
        }
    }

    lines.push(format_total_line("Total", sheet.total(), use_colors));
    lines.join("\n")
}

/// Format a saved performance in full
pub fn format_performance_detail(performance: &Performance, use_colors: bool) -> String {
    let header = format!(
        "#{} recorded {} ({})",
        performance.id,
        performance.date.format("%Y-%m-%d %H:%M"),
        format_age(performance.age())
    );
    let header = if use_colors {
        header.dimmed().to_string()
    } else {
        header
    };
    format!(
        "{}\n{}",
        header,
        format_sheet(&ScoreSheet::from_performance(performance), use_colors)
    )
}

/// Format performances as a table with columns: Id, Score, Type, Age, Label
pub fn format_performance_table(performances: &[&Performance], use_colors: bool) -> String {
    if performances.is_empty() {
        return "No performances recorded.".to_string();
    }

    let term_width = get_terminal_width();
    // "#id" 5 + score 7 + type 12 + age 10, with separators
    let fixed_width = 5 + 7 + 12 + 10 + 8;

    performances
        .iter()
        .map(|p| {
            let id = format!("{:>4}", format!("#{}", p.id));
            let score = format!("{:>7}", format_points(p.total_score));
            let kind = format!("{:<12}", p.event_type.title());
            let age = format!("{:<10}", format_age(p.age()));
            let label = p.label.as_deref().unwrap_or("");
            let label = match term_width {
                Some(width) if width > fixed_width + 10 => truncate(label, width - fixed_width),
                Some(_) => truncate(label, 20),
                None => label.to_string(),
            };

            let line = if use_colors {
                format!(
                    "{}  {}  {}  {}  {}",
                    id.dimmed(),
                    score.bold(),
                    kind.cyan(),
                    age.yellow(),
                    label
                )
            } else {
                format!("{}  {}  {}  {}  {}", id, score, kind, age, label)
            };
            line.trim_end().to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format newly unlocked achievements, one per line
pub fn format_unlocked(unlocked: &[UnlockedAchievement], use_colors: bool) -> String {
    unlocked
        .iter()
        .map(|a| {
            let line = format!("Achievement unlocked: {} (+{}) - {}", a.title, a.points, a.description);
            if use_colors {
                line.green().to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format the full achievement log with the reward point total
pub fn format_achievements(log: &AchievementLog, use_colors: bool) -> String {
    if log.unlocked.is_empty() {
        return "No achievements unlocked yet.".to_string();
    }

    let mut lines: Vec<String> = log
        .unlocked
        .iter()
        .map(|a| {
            let title = format!("{:<22}", a.title);
            let points = format!("{:>5}", format!("+{}", a.points));
            let date = a.unlocked_at.format("%Y-%m-%d").to_string();
            if use_colors {
                format!("{}{}  {}  {}", title.bold(), points.green(), date.dimmed(), a.description)
            } else {
                format!("{}{}  {}  {}", title, points, date, a.description)
            }
        })
        .collect();

    lines.push(format!("Achievement points: {}", format_points(log.total_points())));
    lines.join("\n")
}
