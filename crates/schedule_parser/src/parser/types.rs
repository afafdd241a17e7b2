/// Types for parsed class schedule data
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A meeting day token.
///
/// Variants are declared in week order, so the derived `Ord` sorts Sunday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Su,
    M,
    T,
    W,
    Th,
    F,
    Sa,
}

impl Day {
    /// Returns the display token for this day (e.g., "Th")
    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Su => "Su",
            Day::M => "M",
            Day::T => "T",
            Day::W => "W",
            Day::Th => "Th",
            Day::F => "F",
            Day::Sa => "Sa",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start and end of a meeting, each "HH:MM" (24-hour) or empty if unknown
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: String,
    pub end: String,
}

impl TimeRange {
    /// Returns true if neither side was recognized.
    pub fn is_empty(&self) -> bool {
        self.start.is_empty() && self.end.is_empty()
    }
}

/// Best-effort split of a location string
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub building: String,
    pub room: String,
}

/// A single class extracted from schedule text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedClass {
    /// Identifier generated at parse time; not stable across parses
    pub id: String,
    pub course_code: String,       // e.g., "BUAD 123"
    pub course_name: String,
    pub instructor: String,
    pub days: Vec<Day>,            // always week-ordered, no duplicates
    pub start_time: String,        // "HH:MM" or ""
    pub end_time: String,          // "HH:MM" or ""
    pub location: String,
    pub building: String,
    pub room: String,
    pub credits: Option<f32>,
    pub semester: String,          // e.g., "Fall 2025"
}

/// Fields gathered for a class while its lines or cells are being read.
///
/// Only becomes a `ParsedClass` through `finish`, which requires a course code.
#[derive(Debug, Clone, Default)]
pub(crate) struct ClassDraft {
    pub course_code: String,
    pub course_name: Option<String>,
    pub instructor: Option<String>,
    pub days: Vec<Day>,
    pub time: Option<TimeRange>,
    pub location: Option<String>,
    pub credits: Option<f32>,
}

impl ClassDraft {
    pub fn new(course_code: String) -> Self {
        Self {
            course_code,
            ..Default::default()
        }
    }

    /// Converts the draft into an output record, applying defaults for unset fields.
    ///
    /// Returns `None` when no course code was recorded.
    pub fn finish(self, semester: &str) -> Option<ParsedClass> {
        if self.course_code.is_empty() {
            return None;
        }

        let location = self.location.unwrap_or_default();
        let split = super::extract::parse_location(&location);
        let time = self.time.unwrap_or_default();

        Some(ParsedClass {
            id: generate_class_id(),
            course_code: self.course_code,
            course_name: self.course_name.unwrap_or_default(),
            instructor: self.instructor.unwrap_or_default(),
            days: self.days,
            start_time: time.start,
            end_time: time.end,
            building: split.building,
            room: split.room,
            location,
            credits: self.credits,
            semester: semester.to_string(),
        })
    }
}

/// Generates a process-local identifier for a parsed class.
fn generate_class_id() -> String {
    let random: u64 = rand::thread_rng().gen();
    format!("class-{:016x}", random)
}
