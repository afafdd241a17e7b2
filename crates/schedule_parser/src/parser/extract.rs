//! Token extractors for schedule text.
//!
//! Every function here degrades to an empty value on input it does not
//! recognize. None of them return errors or panic.

use super::types::{Day, Location, TimeRange};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

// Static patterns - compiled once
static COURSE_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b([a-z]{2,5})\s*(\d{3,4}[a-z]?)\b").unwrap());
static TIME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(\d{1,2})(?::(\d{2}))?\s*(?:([ap])\.?m\b\.?)?").unwrap());
static RANGE_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*(?:[-–—]|\bto\b)\s*").unwrap());
static TIME_RANGE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let part = r"\d{1,2}:\d{2}\s*(?:[ap]\.?m\b\.?)?|\d{1,2}\s*[ap]\.?m\b\.?";
    Regex::new(&format!(r"(?i)\b({part})\s*(?:-|–|—|\bto\b)\s*({part})")).unwrap()
});
static TIME_START_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b\d{1,2}(?::\d{2}|\s*[ap]\.?m\b)").unwrap());
static LOCATION_SPLIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?[A-Za-z].*?)[\s\-#]*(\d+[A-Za-z]?)$").unwrap());
static LOCATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z][A-Za-z.&'\-]*(?:\s+[A-Za-z][A-Za-z.&'\-]*)*\s*\d{2,4}[A-Za-z]?\b")
        .unwrap()
});
static DAY_TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:Mon|MON|Tues?|TUES?|Wed|WED|Thu(?:rs?)?|THU(?:RS?)?|Fri|FRI|Sat|SAT|Sun|SUN|Th|TH|Tu|TU|Sa|SA|Su|SU|M|T|W|R|F)+$",
    )
    .unwrap()
});
static TITLED_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Dr|Prof|Professor)\.?\s+(?:[A-Z]\.\s*)*[A-Z][a-z][A-Za-z'\-]*(?:\s+[A-Z][a-z][A-Za-z'\-]+)?")
        .unwrap()
});
static LABELED_NAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:Instructor|INSTRUCTOR|instructor)\s*:?\s*((?:(?:Dr|Prof|Professor)\.?\s+)?(?:[A-Z]\.\s*)*[A-Z][A-Za-z'\-]*(?:,?\s+[A-Z][a-z][A-Za-z'\-]+)?)")
        .unwrap()
});
static STAFF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:Staff|STAFF)\b\s*:?\s*(.*)$").unwrap());
static CREDITS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(\d{1,2}(?:\.\d+)?)\s*(?:credits?|units?|hrs?|hours?)\b").unwrap()
});
static NAME_SEPARATOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[|;,(\[]|\s[-–—]\s").unwrap());

/// Department-like words that are never course departments
const NON_DEPARTMENTS: &[&str] = &["SPRING", "SUMMER", "FALL", "WINTER", "ROOM"];

/// Parses a meeting-day string into week-ordered day tokens.
///
/// Known compound patterns ("MWF", "TTh", "TR", ...) are looked up first;
/// anything else is scanned left to right, reading "TH" before "T".
/// Unrecognized input yields an empty list.
pub fn parse_days(days_str: &str) -> Vec<Day> {
    let normalized: String = days_str
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '/' | ',' | '.' | '-'))
        .collect();

    if normalized.is_empty() {
        return Vec::new();
    }

    if let Some(days) = known_day_pattern(&normalized) {
        return days.to_vec();
    }

    // Longer prefixes first so "THURS" is not read as "TH" + "U" + ...
    const PREFIXES: &[(&str, Day)] = &[
        ("THURS", Day::Th),
        ("THUR", Day::Th),
        ("THU", Day::Th),
        ("TUES", Day::T),
        ("TUE", Day::T),
        ("MON", Day::M),
        ("WED", Day::W),
        ("FRI", Day::F),
        ("SAT", Day::Sa),
        ("SUN", Day::Su),
        ("TH", Day::Th),
        ("TU", Day::T),
        ("SA", Day::Sa),
        ("SU", Day::Su),
        ("M", Day::M),
        ("T", Day::T),
        ("W", Day::W),
        ("F", Day::F),
    ];

    let mut found = BTreeSet::new();
    let mut rest = normalized.as_str();
    while let Some(c) = rest.chars().next() {
        match PREFIXES.iter().find(|(prefix, _)| rest.starts_with(prefix)) {
            Some((prefix, day)) => {
                found.insert(*day);
                rest = &rest[prefix.len()..];
            }
            None => rest = &rest[c.len_utf8()..],
        }
    }

    found.into_iter().collect()
}

/// Exact-match table of common day patterns (input already uppercased).
fn known_day_pattern(normalized: &str) -> Option<&'static [Day]> {
    use Day::*;

    let days: &'static [Day] = match normalized {
        "M" | "MON" => &[M],
        "T" | "TU" | "TUE" | "TUES" => &[T],
        "W" | "WED" => &[W],
        "TH" | "R" | "THU" | "THUR" | "THURS" => &[Th],
        "F" | "FRI" => &[F],
        "SA" | "SAT" => &[Sa],
        "SU" | "SUN" => &[Su],
        "MW" => &[M, W],
        "WF" => &[W, F],
        "MF" => &[M, F],
        "MWF" => &[M, W, F],
        "TTH" | "TR" | "TUTH" => &[T, Th],
        "MTW" => &[M, T, W],
        "MTWTH" | "MTWR" => &[M, T, W, Th],
        "TWTHF" | "TWRF" => &[T, W, Th, F],
        "MTWTHF" | "MTWRF" => &[M, T, W, Th, F],
        "SASU" | "SS" => &[Su, Sa],
        _ => return None,
    };

    Some(days)
}

/// Parses a clock time into 24-hour "HH:MM".
///
/// A PM hour other than 12 gets 12 added and 12 AM becomes 00. Without a
/// meridiem the hour is taken as written, so "9:30" stays "09:30". Returns an
/// empty string when no time is found or the result is out of range.
pub fn parse_time(time_str: &str) -> String {
    let Some(caps) = TIME_REGEX.captures(time_str) else {
        return String::new();
    };

    let Some(mut hours) = caps.get(1).and_then(|m| m.as_str().parse::<u32>().ok()) else {
        return String::new();
    };
    let minutes = caps
        .get(2)
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .unwrap_or(0);

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()) {
        Some(ref meridiem) if meridiem == "p" && hours != 12 => hours += 12,
        Some(ref meridiem) if meridiem == "a" && hours == 12 => hours = 0,
        _ => {}
    }

    if hours > 23 || minutes > 59 {
        return String::new();
    }

    format!("{:02}:{:02}", hours, minutes)
}

/// Splits a range on a dash or "to" and parses each side independently.
///
/// Either side may come back empty. End is not checked against start.
pub fn parse_time_range(range_str: &str) -> TimeRange {
    let mut parts = RANGE_SPLIT_REGEX.splitn(range_str.trim(), 2);
    let start = parts.next().map(parse_time).unwrap_or_default();
    let end = parts.next().map(parse_time).unwrap_or_default();

    TimeRange { start, end }
}

/// Extracts the first course code in `text` as "DEPT ####[letter]".
///
/// Returns an empty string when none is found.
pub fn parse_course_code(text: &str) -> String {
    find_course_code(text)
        .map(|found| found.code)
        .unwrap_or_default()
}

/// A course code located inside a larger string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CourseCodeMatch {
    pub code: String,
    pub start: usize,
    pub end: usize,
}

/// Finds the first course code in `text`, along with its byte span.
pub(crate) fn find_course_code(text: &str) -> Option<CourseCodeMatch> {
    COURSE_CODE_REGEX.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let department = caps.get(1)?.as_str().to_uppercase();
        if NON_DEPARTMENTS.contains(&department.as_str()) {
            return None;
        }
        let number = caps.get(2)?.as_str().to_uppercase();

        Some(CourseCodeMatch {
            code: format!("{} {}", department, number),
            start: whole.start(),
            end: whole.end(),
        })
    })
}

/// Splits a location into building and room.
///
/// "HAL 101" gives building "HAL" and room "101". Text without a trailing
/// number is returned whole as the building.
pub fn parse_location(text: &str) -> Location {
    let trimmed = text.trim();

    match LOCATION_SPLIT_REGEX.captures(trimmed) {
        Some(caps) => Location {
            building: caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default().to_string(),
            room: caps.get(2).map(|m| m.as_str()).unwrap_or_default().to_string(),
        },
        None => Location {
            building: trimmed.to_string(),
            room: String::new(),
        },
    }
}

/// Returns true if `word` has the shape of a meeting-day token ("MWF", "TTh", "Mon").
pub(crate) fn is_day_token(word: &str) -> bool {
    let compact: String = word
        .chars()
        .filter(|c| !matches!(c, '/' | ','))
        .collect();

    !compact.is_empty() && DAY_TOKEN_REGEX.is_match(&compact) && !parse_days(&compact).is_empty()
}

/// Finds the first day-token word in a line and parses it.
pub(crate) fn find_days(line: &str) -> Option<Vec<Day>> {
    line.split_whitespace()
        .map(trim_punctuation)
        .find(|word| is_day_token(word))
        .map(parse_days)
}

/// Finds a "start - end" time range inside a line.
pub(crate) fn find_time_range(line: &str) -> Option<TimeRange> {
    let caps = TIME_RANGE_REGEX.captures(line)?;
    let range = TimeRange {
        start: parse_time(caps.get(1)?.as_str()),
        end: parse_time(caps.get(2)?.as_str()),
    };

    (!range.is_empty()).then_some(range)
}

/// Finds an instructor signaled by a label ("Instructor:") or a title ("Dr.", "Prof.").
///
/// With `allow_staff`, a line starting with "Staff" also counts.
pub(crate) fn find_instructor(line: &str, allow_staff: bool) -> Option<String> {
    if let Some(name) = LABELED_NAME_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|name| !name.is_empty())
    {
        return Some(name);
    }

    if let Some(m) = TITLED_NAME_REGEX.find(line) {
        return Some(m.as_str().trim().to_string());
    }

    if allow_staff {
        if let Some(caps) = STAFF_REGEX.captures(line) {
            let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
            return Some(if name.is_empty() {
                "Staff".to_string()
            } else {
                name.to_string()
            });
        }
    }

    None
}

/// Finds a credit count followed by a unit word ("3 credits", "4.0 units", "3 hrs").
pub(crate) fn find_credits(line: &str) -> Option<f32> {
    CREDITS_REGEX
        .captures(line)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f32>().ok())
}

/// Finds a "building room" location in a line.
///
/// Time ranges, day tokens and instructor names are removed first so that
/// e.g. "AM 10" or "Dr. Smith 204" are not read as places.
pub(crate) fn find_location(line: &str) -> Option<String> {
    let mut residual = TIME_RANGE_REGEX.replace_all(line, " ").into_owned();
    for pattern in [&*LABELED_NAME_REGEX, &*TITLED_NAME_REGEX, &*CREDITS_REGEX] {
        residual = pattern.replace_all(&residual, " ").into_owned();
    }
    let residual = residual
        .split_whitespace()
        .filter(|word| !is_day_token(trim_punctuation(word)))
        .collect::<Vec<_>>()
        .join(" ");

    LOCATION_REGEX
        .find(&residual)
        .map(|m| m.as_str().trim().to_string())
}

/// Extracts a course title from the text that follows a course code.
///
/// The title ends at the first separator, day token, time, credit count or
/// instructor label.
pub(crate) fn extract_course_name(rest: &str) -> Option<String> {
    let rest = rest.trim_start_matches(|c: char| {
        c.is_whitespace() || matches!(c, '-' | '–' | '—' | ':' | '|' | ',' | '.')
    });

    let mut end = rest.len();
    let cut_points = [
        NAME_SEPARATOR_REGEX.find(rest).map(|m| m.start()),
        TIME_START_REGEX.find(rest).map(|m| m.start()),
        CREDITS_REGEX.find(rest).map(|m| m.start()),
        LABELED_NAME_REGEX.find(rest).map(|m| m.start()),
        TITLED_NAME_REGEX.find(rest).map(|m| m.start()),
    ];
    for cut in cut_points.into_iter().flatten() {
        end = end.min(cut);
    }

    let name = rest[..end]
        .split_whitespace()
        .take_while(|word| !is_day_token(trim_punctuation(word)))
        .collect::<Vec<_>>()
        .join(" ");

    (!name.is_empty()).then_some(name)
}

fn trim_punctuation(word: &str) -> &str {
    word.trim_matches(|c: char| matches!(c, ',' | ';' | '(' | ')' | '[' | ']'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use Day::*;

    #[test]
    fn test_parse_days_compound_patterns() {
        assert_eq!(parse_days("MWF"), vec![M, W, F]);
        assert_eq!(parse_days("TTh"), vec![T, Th]);
        assert_eq!(parse_days("TR"), vec![T, Th]);
        assert_eq!(parse_days("tuth"), vec![T, Th]);
        assert_eq!(parse_days("MW"), vec![M, W]);
        assert_eq!(parse_days("MTWRF"), vec![M, T, W, Th, F]);
        assert_eq!(parse_days(" M W F "), vec![M, W, F]);
    }

    #[test]
    fn test_parse_days_thursday_precedence() {
        assert_eq!(parse_days("TH"), vec![Th]);
        assert_eq!(parse_days("WTH"), vec![W, Th]);
    }

    #[test]
    fn test_parse_days_dedup_and_order() {
        assert_eq!(parse_days("MWMW"), vec![M, W]);
        assert_eq!(parse_days("FWM"), vec![M, W, F]);
        assert_eq!(parse_days("SaSuF"), vec![Su, F, Sa]);
    }

    #[test]
    fn test_parse_days_names() {
        assert_eq!(parse_days("Mon/Wed/Fri"), vec![M, W, F]);
        assert_eq!(parse_days("Tuesday Thursday"), vec![T, Th]);
        assert_eq!(parse_days("Saturday"), vec![Sa]);
    }

    #[test]
    fn test_parse_days_unrecognized() {
        assert!(parse_days("").is_empty());
        assert!(parse_days("xyz").is_empty());
        assert!(parse_days("12345").is_empty());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("9:30 AM"), "09:30");
        assert_eq!(parse_time("1:00 PM"), "13:00");
        assert_eq!(parse_time("12:00 AM"), "00:00");
        assert_eq!(parse_time("12:00 PM"), "12:00");
        assert_eq!(parse_time("3pm"), "15:00");
        assert_eq!(parse_time("10:45a.m."), "10:45");
        assert_eq!(parse_time("garbage"), "");
    }

    #[test]
    fn test_parse_time_without_meridiem_is_literal() {
        assert_eq!(parse_time("13:00"), "13:00");
        assert_eq!(parse_time("9:30"), "09:30");
    }

    #[test]
    fn test_parse_time_out_of_range() {
        assert_eq!(parse_time("25:00"), "");
        assert_eq!(parse_time("10:75"), "");
    }

    #[test]
    fn test_parse_time_range() {
        let range = parse_time_range("9:30AM - 10:45AM");
        assert_eq!(range.start, "09:30");
        assert_eq!(range.end, "10:45");

        let range = parse_time_range("2pm to 3:15pm");
        assert_eq!(range.start, "14:00");
        assert_eq!(range.end, "15:15");

        let range = parse_time_range("11:00AM–12:15PM");
        assert_eq!(range.start, "11:00");
        assert_eq!(range.end, "12:15");
    }

    #[test]
    fn test_parse_time_range_partial() {
        let range = parse_time_range("9:00AM - TBA");
        assert_eq!(range.start, "09:00");
        assert_eq!(range.end, "");

        assert!(parse_time_range("nothing here").is_empty());
    }

    #[test]
    fn test_parse_course_code() {
        assert_eq!(parse_course_code("BUAD123"), "BUAD 123");
        assert_eq!(parse_course_code("buad 123"), "BUAD 123");
        assert_eq!(parse_course_code("Chem 201L lab"), "CHEM 201L");
        assert_eq!(parse_course_code("no code here"), "");
    }

    #[test]
    fn test_parse_course_code_skips_seasons() {
        assert_eq!(parse_course_code("Fall 2025"), "");
        assert_eq!(parse_course_code("Fall 2025 MATH 1010"), "MATH 1010");
    }

    #[test]
    fn test_parse_location() {
        assert_eq!(
            parse_location("HAL 101"),
            Location {
                building: "HAL".to_string(),
                room: "101".to_string()
            }
        );
        assert_eq!(
            parse_location("Main Building"),
            Location {
                building: "Main Building".to_string(),
                room: String::new()
            }
        );

        let loc = parse_location("Science Center 204B");
        assert_eq!(loc.building, "Science Center");
        assert_eq!(loc.room, "204B");
    }

    #[test]
    fn test_find_instructor() {
        assert_eq!(find_instructor("Dr. Smith", false), Some("Dr. Smith".to_string()));
        assert_eq!(
            find_instructor("Instructor: Jane Doe", false),
            Some("Jane Doe".to_string())
        );
        assert_eq!(
            find_instructor("taught by Professor Alan Turing MWF", false),
            Some("Professor Alan Turing".to_string())
        );
        assert_eq!(find_instructor("Staff", false), None);
        assert_eq!(find_instructor("Staff", true), Some("Staff".to_string()));
    }

    #[test]
    fn test_find_credits() {
        assert_eq!(find_credits("BUAD 123 Marketing 3 credits"), Some(3.0));
        assert_eq!(find_credits("(4.5 units)"), Some(4.5));
        assert_eq!(find_credits("1 hr"), Some(1.0));
        assert_eq!(find_credits("Room 101"), None);
    }

    #[test]
    fn test_find_location_ignores_times_and_days() {
        assert_eq!(
            find_location("MWF 9:00AM - 10:45AM HAL 101"),
            Some("HAL 101".to_string())
        );
        assert_eq!(find_location("9:00AM - 10:45AM"), None);
    }

    #[test]
    fn test_extract_course_name() {
        assert_eq!(extract_course_name(" - Marketing MWF"), Some("Marketing".to_string()));
        assert_eq!(
            extract_course_name(": Organic Chemistry TTh 9:30AM-10:45AM"),
            Some("Organic Chemistry".to_string())
        );
        assert_eq!(
            extract_course_name(" Intro to Finance (3 credits)"),
            Some("Intro to Finance".to_string())
        );
        assert_eq!(extract_course_name(" MWF 9:00AM"), None);
    }
}
