//! Month grid for the calendar page.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;

use crate::types::Task;
use crate::views::{self, DayIndicator};

/// One day of the month grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub indicator: DayIndicator,
}

/// A calendar month laid out in Sunday-first weeks.
///
/// Cells outside the month are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<[Option<DayCell>; 7]>,
}

impl MonthGrid {
    pub fn build(year: i32, month: u32, tasks: &[Task]) -> Option<Self> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let month_tasks = views::tasks_in_month(tasks, year, month);

        let mut weeks = Vec::new();
        let mut week: [Option<DayCell>; 7] = [None; 7];
        let mut slot = first.weekday().num_days_from_sunday() as usize;

        for date in first.iter_days().take_while(|d| d.month() == month) {
            let indicator =
                views::day_indicator(month_tasks.iter().copied().filter(|t| t.deadline_date() == date));
            week[slot] = Some(DayCell { date, indicator });
            slot += 1;
            if slot == 7 {
                weeks.push(week);
                week = [None; 7];
                slot = 0;
            }
        }
        if slot > 0 {
            weeks.push(week);
        }

        Some(Self { year, month, weeks })
    }

    pub fn for_date(date: NaiveDate, tasks: &[Task]) -> Self {
        // the first of any valid date's month always exists
        Self::build(date.year(), date.month(), tasks).unwrap_or_else(|| Self {
            year: date.year(),
            month: date.month(),
            weeks: Vec::new(),
        })
    }

    /// "May 2025"
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string())
            .unwrap_or_default()
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.weeks.iter().flat_map(|w| w.iter().flatten())
    }
}

pub fn previous_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_sub_months(Months::new(1))
        .unwrap_or(date)
}

pub fn next_month(date: NaiveDate) -> NaiveDate {
    first_of_month(date)
        .checked_add_months(Months::new(1))
        .unwrap_or(date)
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Parse a `?date=YYYY-MM-DD` value, falling back to `today`
pub fn selected_date(raw: Option<&str>, today: NaiveDate) -> NaiveDate {
    raw.and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
        .unwrap_or(today)
}
