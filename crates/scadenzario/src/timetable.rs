//! Weekly class timetable: hourly slots from 8:00 to 18:00, Monday to Friday.

use chrono::{NaiveTime, Timelike};

use crate::types::{ClassSession, Weekday};

pub const FIRST_SLOT_HOUR: u32 = 8;
pub const SLOT_COUNT: usize = 11;

/// Row labels ("8:00 AM" .. "6:00 PM")
pub fn slot_labels() -> Vec<String> {
    (0..SLOT_COUNT as u32)
        .map(|i| {
            let hour = FIRST_SLOT_HOUR + i;
            let (display, suffix) = match hour {
                0 => (12, "AM"),
                1..=11 => (hour, "AM"),
                12 => (12, "PM"),
                _ => (hour - 12, "PM"),
            };
            format!("{}:00 {}", display, suffix)
        })
        .collect()
}

/// Row a class starts in; classes before the first slot are pinned to it
pub fn slot_index(start: NaiveTime) -> usize {
    start.hour().saturating_sub(FIRST_SLOT_HOUR) as usize
}

/// Whole hours between start and end, never less than one row
pub fn duration_slots(start: NaiveTime, end: NaiveTime) -> usize {
    (end.hour() as i64 - start.hour() as i64).max(1) as usize
}

/// Classes on `day` whose start falls in row `slot`
pub fn classes_at(classes: &[ClassSession], day: Weekday, slot: usize) -> Vec<&ClassSession> {
    classes
        .iter()
        .filter(|c| c.day == day && slot_index(c.start_time) == slot)
        .collect()
}
