//! Derived views over a task collection.
//!
//! Everything here is pure: the functions borrow the tasks, never mutate
//! them, and take the current time as an argument instead of reading a clock.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::types::{Priority, Task, TimeBand, Weekday};

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Tasks due on `day`, regardless of time of day, in input order
pub fn tasks_on_date(tasks: &[Task], day: NaiveDate) -> Vec<&Task> {
    tasks.iter().filter(|t| t.deadline_date() == day).collect()
}

/// Tasks due in the given month
pub fn tasks_in_month(tasks: &[Task], year: i32, month: u32) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|t| t.deadline.year() == year && t.deadline.month() == month)
        .collect()
}

/// Dots shown under a calendar day
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DayIndicator {
    pub count: usize,
    pub has_urgent: bool,
    pub has_high: bool,
    pub has_other: bool,
}

impl DayIndicator {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

pub fn day_indicator<'a, I>(day_tasks: I) -> DayIndicator
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut count = 0;
    let mut has_urgent = false;
    let mut has_high = false;
    for task in day_tasks {
        count += 1;
        if !task.completed {
            has_urgent |= task.priority == Priority::Urgent;
            has_high |= task.priority == Priority::High;
        }
    }
    let dots = has_urgent as usize + has_high as usize;
    DayIndicator {
        count,
        has_urgent,
        has_high,
        has_other: count > dots,
    }
}

/// Tasks of one weekday, split by time band
#[derive(Debug, Clone, Default, Serialize)]
pub struct DayBands<'a> {
    pub morning: Vec<&'a Task>,
    pub afternoon: Vec<&'a Task>,
    pub evening: Vec<&'a Task>,
}

impl<'a> DayBands<'a> {
    pub fn band(&self, band: TimeBand) -> &[&'a Task] {
        match band {
            TimeBand::Morning => &self.morning,
            TimeBand::Afternoon => &self.afternoon,
            TimeBand::Evening => &self.evening,
        }
    }

    fn band_mut(&mut self, band: TimeBand) -> &mut Vec<&'a Task> {
        match band {
            TimeBand::Morning => &mut self.morning,
            TimeBand::Afternoon => &mut self.afternoon,
            TimeBand::Evening => &mut self.evening,
        }
    }

    pub fn len(&self) -> usize {
        self.morning.len() + self.afternoon.len() + self.evening.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Weekday x time band grid, Monday first
#[derive(Debug, Clone, Default)]
pub struct WeekGrid<'a> {
    days: [DayBands<'a>; 7],
}

impl<'a> WeekGrid<'a> {
    pub fn day(&self, weekday: Weekday) -> &DayBands<'a> {
        &self.days[weekday.index()]
    }

    pub fn cell(&self, weekday: Weekday, band: TimeBand) -> &[&'a Task] {
        self.day(weekday).band(band)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &DayBands<'a>)> {
        Weekday::ALL.into_iter().zip(self.days.iter())
    }

    pub fn len(&self) -> usize {
        self.days.iter().map(DayBands::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for WeekGrid<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(7))?;
        for (weekday, bands) in self.iter() {
            map.serialize_entry(weekday.name(), bands)?;
        }
        map.end()
    }
}

/// Bucket tasks by deadline weekday and hour band.
///
/// Every task lands in exactly one cell; order inside a cell follows input order.
pub fn group_by_weekday(tasks: &[Task]) -> WeekGrid<'_> {
    let mut grid = WeekGrid::default();
    for task in tasks {
        let weekday = Weekday::of(task.deadline_date());
        let band = TimeBand::of_hour(task.deadline_hour());
        grid.days[weekday.index()].band_mut(band).push(task);
    }
    grid
}

/// Incomplete tasks per priority level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub urgent: usize,
}

impl PriorityCounts {
    pub fn get(&self, priority: Priority) -> usize {
        match priority {
            Priority::Low => self.low,
            Priority::Medium => self.medium,
            Priority::High => self.high,
            Priority::Urgent => self.urgent,
        }
    }

    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::High => self.high += 1,
            Priority::Urgent => self.urgent += 1,
        }
    }
}

pub fn priority_counts(tasks: &[Task]) -> PriorityCounts {
    let mut counts = PriorityCounts::default();
    for task in tasks.iter().filter(|t| !t.completed) {
        counts.bump(task.priority);
    }
    counts
}

/// Whole days from `now` until `deadline`, rounded up.
///
/// Overdue deadlines give zero or negative values.
pub fn days_until(deadline: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let diff = (deadline - now).num_milliseconds();
    (diff + MILLIS_PER_DAY - 1).div_euclid(MILLIS_PER_DAY)
}

/// Incomplete tasks due within `horizon_days`, earliest first.
///
/// Overdue tasks are kept: they still need attention. Equal deadlines keep
/// their input order.
pub fn upcoming(tasks: &[Task], now: NaiveDateTime, horizon_days: i64) -> Vec<&Task> {
    let mut due: Vec<&Task> = tasks
        .iter()
        .filter(|t| !t.completed && days_until(t.deadline, now) <= horizon_days)
        .collect();
    due.sort_by_key(|t| t.deadline);
    due
}

pub fn is_overdue(task: &Task, now: NaiveDateTime) -> bool {
    task.deadline < now && !task.completed
}

pub fn incomplete(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| !t.completed).collect()
}

pub fn completed(tasks: &[Task]) -> Vec<&Task> {
    tasks.iter().filter(|t| t.completed).collect()
}

/// Totals shown on the dashboard header card
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

pub fn summary(tasks: &[Task]) -> Summary {
    let completed = tasks.iter().filter(|t| t.completed).count();
    Summary {
        total: tasks.len(),
        active: tasks.len() - completed,
        completed,
    }
}
