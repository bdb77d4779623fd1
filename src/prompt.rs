//! Line prompts for entering a performance at the terminal.

use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// What the athlete typed for one event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Empty line: leave the event as it is
    Keep,
    /// `p<points>`, e.g. `p950`
    Points(u32),
    /// Anything else is a raw time or mark
    Result(String),
    /// `p` followed by something that is not a points value
    BadPoints(String),
}

impl Entry {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Entry::Keep;
        }
        match input.strip_prefix(['p', 'P']) {
            Some(points) => match points.trim().parse() {
                Ok(points) => Entry::Points(points),
                Err(_) => Entry::BadPoints(points.trim().to_string()),
            },
            None => Entry::Result(input.to_string()),
        }
    }
}

fn read_answer<R: BufRead, W: Write>(input: &mut R, output: &mut W, message: &str) -> Result<String> {
    write!(output, "{}", message).context("Failed to write prompt")?;
    output.flush().context("Failed to flush prompt")?;
    let mut line = String::new();
    input.read_line(&mut line).context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Ask for one event's result, showing the current value (or a hint) in
/// brackets as the value kept on Enter.
pub fn prompt_entry<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    event: &str,
    unit: &str,
    current: &str,
) -> Result<Entry> {
    let answer = read_answer(input, output, &format!("{} ({}) [{}]: ", event, unit, current))?;
    Ok(Entry::parse(&answer))
}

/// Yes/no question; an empty answer takes the default.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    question: &str,
    default_yes: bool,
) -> Result<bool> {
    let hint = if default_yes { "Y/n" } else { "y/N" };
    let answer = read_answer(input, output, &format!("{} [{}]: ", question, hint))?.to_lowercase();
    if answer.is_empty() {
        Ok(default_yes)
    } else {
        Ok(answer == "y" || answer == "yes")
    }
}
