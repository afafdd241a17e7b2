//! Semester detection.
//!
//! This is the only part of the parser that reads the wall clock, and it
//! does so through [`Clock`] so callers and tests can pin "today".

use chrono::{Datelike, Local, NaiveDate};
use regex::Regex;
use std::sync::LazyLock;

static SEASON_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(spring|summer|fall)\b(?:\s*(\d{4})\b)?").unwrap());

/// Source of the current date.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Reads the local system date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Detects the semester label ("Fall 2025") using the system clock.
pub fn detect_semester(text: &str) -> String {
    detect_semester_with(text, &SystemClock)
}

/// Detects the semester label for `text`.
///
/// An explicit "spring"/"summer"/"fall" keyword wins, with its year if one
/// follows it, else the current year. Without a keyword the season comes
/// from the current month: January-May Spring, June-August Summer,
/// September-December Fall.
pub fn detect_semester_with(text: &str, clock: &dyn Clock) -> String {
    let today = clock.today();

    if let Some(caps) = SEASON_REGEX.captures(text) {
        let season = caps
            .get(1)
            .map(|m| capitalize(m.as_str()))
            .unwrap_or_default();
        let year = caps
            .get(2)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| today.year().to_string());
        return format!("{} {}", season, year);
    }

    let season = match today.month0() {
        0..=4 => "Spring",
        5..=7 => "Summer",
        _ => "Fall",
    };

    format!("{} {}", season, today.year())
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
