//! Line-oriented schedule parsing for text without table structure.
//!
//! A line carrying a course code opens a class; following lines fill in
//! whatever that class is still missing, until the next course code.
//!
//! A line holding nothing but a code ("HAL 101") right after a class's
//! meeting pattern may be that class's room or the next class. It is held
//! as pending until the following line decides.

use super::extract::{
    extract_course_name, find_course_code, find_credits, find_days, find_instructor,
    find_location, find_time_range, is_day_token, CourseCodeMatch,
};
use super::types::{ClassDraft, ParsedClass};
use tracing::debug;

/// Words that introduce a room rather than a course ("Room: HAL 101", "Smith Hall 204")
const LOCATION_WORDS: &[&str] = &["ROOM", "RM", "LOCATION", "LOC", "HALL", "BLDG", "BUILDING"];

/// A bare course code not yet known to be a room or a new class
#[derive(Debug)]
struct PendingCode {
    code: String,
    text: String,
}

/// Parses free-form schedule text in a single pass over its lines.
pub(crate) fn parse_freeform(text: &str, semester: &str) -> Vec<ParsedClass> {
    let mut classes = Vec::new();
    let mut current: Option<ClassDraft> = None;
    let mut pending: Option<PendingCode> = None;

    for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let found = find_course_code(line).filter(|found| !is_labeled_location(line, found));

        if let Some(code) = pending.take() {
            let opens_class = found.is_none()
                && current
                    .as_ref()
                    .is_some_and(|draft| starts_next_class(draft, line));

            if opens_class {
                debug!("Reading {} as a new class", code.code);
                if let Some(done) = current.take() {
                    classes.extend(done.finish(semester));
                }
                current = Some(ClassDraft::new(code.code));
            } else if let Some(draft) = current.as_mut() {
                draft.location = Some(code.text);
            }
        }

        match found {
            Some(found) if may_be_location(line, &found, current.as_ref()) => {
                pending = Some(PendingCode {
                    code: found.code,
                    text: line.to_string(),
                });
            }
            Some(found) => {
                if let Some(done) = current.take() {
                    classes.extend(done.finish(semester));
                }
                current = Some(start_class(line, found));
            }
            None => match current.as_mut() {
                Some(draft) => continue_class(draft, line),
                None => debug!("Discarding line outside any class: {:?}", line),
            },
        }
    }

    if let (Some(code), Some(draft)) = (pending.take(), current.as_mut()) {
        draft.location = Some(code.text);
    }

    if let Some(done) = current.take() {
        classes.extend(done.finish(semester));
    }

    classes
}

/// A line that is nothing but a code-shaped token, seen while the open class
/// has a meeting pattern but no place yet, may be that class's room.
fn may_be_location(line: &str, found: &CourseCodeMatch, current: Option<&ClassDraft>) -> bool {
    let bare = found.start == 0 && found.end == line.len();

    bare && current.is_some_and(|draft| {
        draft.location.is_none() && (!draft.days.is_empty() || draft.time.is_some())
    })
}

/// Returns true if a code is a room: its department is a place word
/// ("HALL 204") or a place word comes right before it ("Room: HAL 101").
fn is_labeled_location(line: &str, found: &CourseCodeMatch) -> bool {
    let department = found.code.split_whitespace().next().unwrap_or_default();
    let preceding = line[..found.start]
        .trim_end_matches(|c: char| c.is_whitespace() || matches!(c, ':' | '#' | '-'))
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .to_uppercase();

    LOCATION_WORDS.contains(&department) || LOCATION_WORDS.contains(&preceding.as_str())
}

/// Decides a pending code: the line after it opens a new class when it is a
/// title, or repeats days or a time the open class already has.
fn starts_next_class(draft: &ClassDraft, line: &str) -> bool {
    let days = find_days(line);
    let time = find_time_range(line);

    if (days.is_some() && !draft.days.is_empty()) || (time.is_some() && draft.time.is_some()) {
        return true;
    }

    days.is_none()
        && time.is_none()
        && find_instructor(line, true).is_none()
        && find_location(line).is_none()
        && looks_like_title(line)
}

/// Opens a class from a course-code line, taking any fields that share the line.
fn start_class(line: &str, found: CourseCodeMatch) -> ClassDraft {
    let rest = &line[found.end..];
    let mut draft = ClassDraft::new(found.code);

    draft.course_name = extract_course_name(rest);
    draft.days = find_days(rest).unwrap_or_default();
    draft.time = find_time_range(rest);
    draft.instructor = find_instructor(rest, false);
    draft.credits = find_credits(rest);

    draft
}

/// Fills fields the open class is still missing from a continuation line.
fn continue_class(draft: &mut ClassDraft, line: &str) {
    let mut matched = false;

    if draft.days.is_empty() {
        if let Some(days) = find_days(line) {
            draft.days = days;
            matched = true;
        }
    }

    if draft.time.is_none() {
        if let Some(range) = find_time_range(line) {
            draft.time = Some(range);
            matched = true;
        }
    }

    if draft.instructor.is_none() {
        if let Some(name) = find_instructor(line, true) {
            draft.instructor = Some(name);
            matched = true;
        }
    }

    if draft.location.is_none() {
        if let Some(location) = find_location(line) {
            draft.location = Some(location);
            matched = true;
        }
    }

    if !matched && draft.course_name.is_none() && looks_like_title(line) {
        draft.course_name = Some(line.to_string());
    }
}

fn looks_like_title(line: &str) -> bool {
    let compact: String = line.split_whitespace().collect();
    !line.starts_with(|c: char| c.is_ascii_digit()) && !is_day_token(&compact)
}
