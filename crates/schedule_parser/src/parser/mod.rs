/// Schedule text parsing module
mod extract;
mod format;
mod freeform;
mod semester;
mod table;
mod types;

pub use extract::{parse_course_code, parse_days, parse_location, parse_time, parse_time_range};
pub use format::{format_days_display, format_time_display, generate_class_color, CLASS_COLORS};
pub use semester::{detect_semester, detect_semester_with, Clock, FixedClock, SystemClock};
pub use types::*;

use std::sync::Arc;
use tracing::debug;

/// Parses pasted or extracted schedule text into classes.
///
/// Holds the clock used for semester detection; everything else is pure.
#[derive(Clone)]
pub struct ScheduleParser {
    clock: Arc<dyn Clock>,
}

impl ScheduleParser {
    /// Creates a parser that reads the system clock.
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Creates a parser with a custom clock
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    /// Detects the semester label for `text` with this parser's clock.
    pub fn semester(&self, text: &str) -> String {
        detect_semester_with(text, self.clock.as_ref())
    }

    /// Parses schedule text into classes.
    ///
    /// Text with a tab on any line is read as a table, anything else line by
    /// line. Rows and lines that cannot be tied to a course code are dropped;
    /// unrecognized input gives an empty list rather than an error.
    pub fn parse(&self, text: &str) -> Vec<ParsedClass> {
        let semester = self.semester(text);

        let classes = if table::is_tabular(text) {
            debug!("Parsing schedule text as a table");
            table::parse_table(text, &semester)
        } else {
            debug!("Parsing schedule text as free-form lines");
            freeform::parse_freeform(text, &semester)
        };

        debug!(count = classes.len(), semester = %semester, "Parsed schedule text");
        classes
    }
}

impl Default for ScheduleParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses schedule text using the system clock for semester defaults.
pub fn parse_schedule_text(text: &str) -> Vec<ParsedClass> {
    ScheduleParser::new().parse(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn parser_on(year: i32, month: u32, day: u32) -> ScheduleParser {
        let today = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        ScheduleParser::with_clock(Arc::new(FixedClock(today)))
    }

    /// Everything except the per-parse id
    fn content(classes: &[ParsedClass]) -> Vec<ParsedClass> {
        classes
            .iter()
            .cloned()
            .map(|mut class| {
                class.id.clear();
                class
            })
            .collect()
    }

    #[test]
    fn test_table_input() {
        let text = "Course\tTitle\tDays\tTime\nBUAD 123\tMarketing\tMWF\t9:00AM-9:50AM";
        let classes = parser_on(2026, 2, 1).parse(text);

        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].course_code, "BUAD 123");
        assert_eq!(classes[0].course_name, "Marketing");
        assert_eq!(classes[0].days, vec![Day::M, Day::W, Day::F]);
        assert_eq!(classes[0].start_time, "09:00");
        assert_eq!(classes[0].end_time, "09:50");
        assert_eq!(classes[0].semester, "Spring 2026");
    }

    #[test]
    fn test_freeform_input() {
        let text = "BUAD 123 - Marketing MWF\n9:00AM - 9:50AM\nHAL 101\nCHEM 201 - Organic Chemistry TTh\nDr. Smith";
        let classes = parser_on(2026, 10, 1).parse(text);

        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].location, "HAL 101");
        assert_eq!(classes[1].instructor, "Dr. Smith");
        assert!(classes.iter().all(|c| c.semester == "Fall 2026"));
    }

    #[test]
    fn test_explicit_semester_applies_to_every_class() {
        let text = "Spring 2027\nBUAD 123 Marketing\nCHEM 201 Chemistry";
        let classes = parser_on(2026, 10, 1).parse(text);

        assert_eq!(classes.len(), 2);
        assert!(classes.iter().all(|c| c.semester == "Spring 2027"));
    }

    #[test]
    fn test_garbage_input() {
        let parser = parser_on(2026, 2, 1);
        assert!(parser.parse("hello world\nno courses here").is_empty());
        assert!(parser.parse("").is_empty());
        assert!(parser.parse("\t\t\n\t").is_empty());
    }

    #[test]
    fn test_same_input_same_output() {
        let parser = parser_on(2026, 2, 1);
        let text = "CSE 100 Data Structures MWF 10:00AM-10:50AM\nCENTR 115\nCSE 101 Algorithms TTh";

        let first = parser.parse(text);
        let second = parser.parse(text);
        assert_eq!(content(&first), content(&second));
    }

    #[test]
    fn test_ids_are_distinct() {
        let classes = parser_on(2026, 2, 1).parse("BUAD 123\nCHEM 201\nMATH 150");
        assert_eq!(classes.len(), 3);
        assert_ne!(classes[0].id, classes[1].id);
        assert_ne!(classes[1].id, classes[2].id);
    }

    #[test]
    fn test_parsed_days_are_sorted_and_unique() {
        let text = "HIST 210 History FWMW 1:00PM-1:50PM\nART 101 Drawing ThT";
        for class in parser_on(2026, 2, 1).parse(text) {
            let mut sorted = class.days.clone();
            sorted.sort();
            sorted.dedup();
            assert_eq!(class.days, sorted);
        }
    }
}
