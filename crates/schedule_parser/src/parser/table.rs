//! Tab-delimited schedule parsing.
//!
//! Columns are assigned roles from a header row when one exists, otherwise
//! each cell's role is guessed from its content.

use super::extract::{
    find_course_code, is_day_token, parse_days, parse_time_range, CourseCodeMatch,
};
use super::types::{ClassDraft, ParsedClass};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// Words that mark a header row (two or more must appear)
const HEADER_KEYWORDS: &[&str] = &[
    "course",
    "title",
    "name",
    "days",
    "time",
    "location",
    "instructor",
    "credits",
    "room",
    "building",
];

/// Honorifics that mark an instructor cell
const INSTRUCTOR_PREFIXES: &[&str] = &["Dr.", "Prof.", "Mr.", "Ms.", "Mrs."];

static TIME_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());
static LOCATION_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z.\s\-]*?\s*\d{2,4}[A-Za-z]?$").unwrap());
static CREDITS_SHAPE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d(?:\.\d)?$").unwrap());
static NUMBER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").unwrap());

/// Semantic role of a table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ColumnRole {
    Course,
    Title,
    Days,
    Time,
    Location,
    Instructor,
    Credits,
}

impl ColumnRole {
    /// Roles in the order they are tried against a header cell
    const PRIORITY: [ColumnRole; 7] = [
        ColumnRole::Course,
        ColumnRole::Title,
        ColumnRole::Days,
        ColumnRole::Time,
        ColumnRole::Location,
        ColumnRole::Instructor,
        ColumnRole::Credits,
    ];

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            ColumnRole::Course => &["course", "code"],
            ColumnRole::Title => &["title", "name"],
            ColumnRole::Days => &["day"],
            ColumnRole::Time => &["time"],
            ColumnRole::Location => &["location", "room", "building"],
            ColumnRole::Instructor => &["instructor", "professor", "teacher"],
            ColumnRole::Credits => &["credit", "unit"],
        }
    }

    fn matches_header(&self, lower_cell: &str) -> bool {
        self.keywords().iter().any(|kw| lower_cell.contains(kw))
    }
}

/// Column index for each role found in the header.
#[derive(Debug, Default)]
struct ColumnMap(HashMap<ColumnRole, usize>);

impl ColumnMap {
    /// Gives each header cell the first matching role not already taken,
    /// so "Course Code" then "Course Name" maps to course and title.
    fn from_header(header: &str) -> Self {
        let mut map = HashMap::new();
        for (idx, cell) in header.split('\t').enumerate() {
            let lower = cell.to_lowercase();
            if let Some(role) = ColumnRole::PRIORITY
                .into_iter()
                .find(|role| !map.contains_key(role) && role.matches_header(&lower))
            {
                map.insert(role, idx);
            }
        }
        Self(map)
    }

    fn cell<'a>(&self, role: ColumnRole, cells: &[&'a str]) -> Option<&'a str> {
        self.0
            .get(&role)
            .and_then(|&idx| cells.get(idx))
            .copied()
            .filter(|cell| !cell.is_empty())
    }
}

/// Returns true if any line contains a tab.
pub(crate) fn is_tabular(text: &str) -> bool {
    text.lines().any(|line| line.contains('\t'))
}

/// Returns true if a line looks like a header row.
fn is_header_line(line: &str) -> bool {
    if find_course_code(line).is_some() {
        return false;
    }

    let lower = line.to_lowercase();
    HEADER_KEYWORDS.iter().filter(|kw| lower.contains(*kw)).count() >= 2
}

/// Parses tab-delimited schedule text, one class per accepted row.
pub(crate) fn parse_table(text: &str, semester: &str) -> Vec<ParsedClass> {
    let lines: Vec<&str> = text.lines().collect();

    let header_idx = lines.iter().position(|line| is_header_line(line));
    let (columns, rows) = match header_idx {
        Some(idx) => {
            let columns = ColumnMap::from_header(lines[idx]);
            debug!("Table header found at line {} with {} mapped columns", idx, columns.0.len());
            (Some(columns), &lines[idx + 1..])
        }
        None => {
            debug!("No table header found, inferring columns from content");
            (None, &lines[..])
        }
    };

    rows.iter()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| parse_row(line, columns.as_ref()))
        .filter_map(|draft| draft.finish(semester))
        .collect()
}

/// Parses one data row. Rows without a course code are dropped.
fn parse_row(line: &str, columns: Option<&ColumnMap>) -> Option<ClassDraft> {
    let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
    if cells.len() < 2 {
        debug!("Skipping row with fewer than 2 columns: {:?}", line);
        return None;
    }

    let Some((code_idx, found)) = cells
        .iter()
        .enumerate()
        .find_map(|(idx, cell)| find_course_code(cell).map(|found| (idx, found)))
    else {
        debug!("Skipping row without a course code: {:?}", line);
        return None;
    };

    // The code's own cell keeps whatever else it holds ("BUAD 123 Marketing")
    let remainder = without_code(cells[code_idx], &found);
    let cells: Vec<&str> = cells
        .iter()
        .enumerate()
        .map(|(idx, &cell)| if idx == code_idx { remainder.as_str() } else { cell })
        .collect();

    let mut draft = ClassDraft::new(found.code);
    match columns {
        Some(columns) => fill_from_columns(&mut draft, columns, &cells),
        None => fill_from_content(&mut draft, &cells),
    }

    Some(draft)
}

/// Text of a cell with the course code cut out and separators trimmed.
fn without_code(cell: &str, found: &CourseCodeMatch) -> String {
    let separator = |c: char| c.is_whitespace() || matches!(c, '-' | ':' | '–' | '—');
    let before = cell[..found.start].trim_end_matches(separator).trim_start();
    let after = cell[found.end..].trim_start_matches(separator).trim_end();

    [before, after]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fills a draft strictly from the header-mapped columns.
fn fill_from_columns(draft: &mut ClassDraft, columns: &ColumnMap, cells: &[&str]) {
    draft.course_name = columns
        .cell(ColumnRole::Title, cells)
        .map(str::to_string);

    if let Some(cell) = columns.cell(ColumnRole::Days, cells) {
        draft.days = parse_days(cell);
    }

    draft.time = columns
        .cell(ColumnRole::Time, cells)
        .map(parse_time_range)
        .filter(|range| !range.is_empty());

    draft.location = columns
        .cell(ColumnRole::Location, cells)
        .map(str::to_string);

    draft.instructor = columns
        .cell(ColumnRole::Instructor, cells)
        .map(str::to_string);

    draft.credits = columns
        .cell(ColumnRole::Credits, cells)
        .and_then(parse_credits_cell);
}

/// Guesses each cell's role from its content.
///
/// Every cell claims at most one role and every role is claimed by the
/// first qualifying cell. The name rule is the least specific, so it is
/// tried last.
fn fill_from_content(draft: &mut ClassDraft, cells: &[&str]) {
    for &cell in cells {
        if cell.is_empty() {
            continue;
        }

        let compact: String = cell.split_whitespace().collect();

        if draft.days.is_empty() && is_day_token(&compact) {
            draft.days = parse_days(&compact);
        } else if draft.time.is_none() && TIME_SHAPE_REGEX.is_match(cell) {
            draft.time = Some(parse_time_range(cell));
        } else if draft.instructor.is_none()
            && INSTRUCTOR_PREFIXES.iter().any(|prefix| cell.starts_with(prefix))
        {
            draft.instructor = Some(cell.to_string());
        } else if draft.credits.is_none() && CREDITS_SHAPE_REGEX.is_match(cell) {
            draft.credits = parse_credits_cell(cell);
        } else if draft.location.is_none() && LOCATION_SHAPE_REGEX.is_match(cell) {
            draft.location = Some(cell.to_string());
        } else if draft.course_name.is_none() && looks_like_name(cell) {
            draft.course_name = Some(cell.to_string());
        }
    }
}

fn looks_like_name(cell: &str) -> bool {
    cell.chars().count() > 3
        && !cell.starts_with(|c: char| c.is_ascii_digit())
        && !is_day_token(cell)
}

fn parse_credits_cell(cell: &str) -> Option<f32> {
    NUMBER_REGEX
        .find(cell)
        .and_then(|m| m.as_str().parse::<f32>().ok())
}
