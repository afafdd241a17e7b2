/// Display helpers for parsed classes
use super::types::Day;
use rand::seq::SliceRandom;

/// Calendar colors handed out to imported classes
pub const CLASS_COLORS: [&str; 8] = [
    "#3B82F6", // blue
    "#10B981", // emerald
    "#F59E0B", // amber
    "#EF4444", // red
    "#8B5CF6", // violet
    "#EC4899", // pink
    "#14B8A6", // teal
    "#F97316", // orange
];

/// Converts "HH:MM" (24-hour) to "H:MM AM/PM".
///
/// Input that is not a valid 24-hour time is returned unchanged.
pub fn format_time_display(time: &str) -> String {
    let Some((hours, minutes)) = time.split_once(':') else {
        return time.to_string();
    };
    if minutes.len() != 2 {
        return time.to_string();
    }
    let (Ok(hours), Ok(minutes)) = (hours.parse::<u32>(), minutes.parse::<u32>()) else {
        return time.to_string();
    };
    if hours > 23 || minutes > 59 {
        return time.to_string();
    }

    let meridiem = if hours >= 12 { "PM" } else { "AM" };
    let display_hour = match hours % 12 {
        0 => 12,
        h => h,
    };

    format!("{}:{:02} {}", display_hour, minutes, meridiem)
}

/// Joins day tokens in the order given ("MWF", "TTh").
pub fn format_days_display(days: &[Day]) -> String {
    days.iter().map(Day::as_str).collect()
}

/// Picks a random color from [`CLASS_COLORS`].
pub fn generate_class_color() -> String {
    CLASS_COLORS
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(CLASS_COLORS[0])
        .to_string()
}
