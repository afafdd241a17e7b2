//! Schedule text parsing.
//!
//! Turns pasted timetables, or text extracted from an uploaded PDF or
//! image, into structured class records: course code, title, instructor,
//! meeting days and times, location, credits and semester.

pub mod config;
pub mod error;
pub mod parser;
pub mod server;
pub mod types;

pub use parser::{
    detect_semester, detect_semester_with, format_days_display, format_time_display,
    generate_class_color, parse_course_code, parse_days, parse_location, parse_schedule_text,
    parse_time, parse_time_range, Clock, Day, FixedClock, Location, ParsedClass, ScheduleParser,
    SystemClock, TimeRange,
};
