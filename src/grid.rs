//! Weekday-aligned day grid for a single month.
//!
//! A [`DaySequence`] lays the days of a month out in rows of seven cells,
//! Sunday first. Cells before the first and after the last day of the month
//! that share a week with it are padding and carry an empty label.

use chrono::{Datelike, Month, NaiveDate, Weekday};
use itertools::Itertools;
use std::fmt;

use crate::error::Result;
use crate::month::MonthIndex;

pub const DAYS_PER_WEEK: usize = 7;

/// Column order of a grid row.
pub const WEEK: [Weekday; DAYS_PER_WEEK] = [
    Weekday::Sun,
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
];

pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Sunday-first column of `weekday`, Sunday = 0 .. Saturday = 6.
pub fn weekday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_sunday() as usize
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    weekday: Weekday,
    date: Option<NaiveDate>,
}

impl DayCell {
    fn padding(weekday: Weekday) -> Self {
        DayCell {
            weekday,
            date: None,
        }
    }

    fn day(date: NaiveDate) -> Self {
        DayCell {
            weekday: date.weekday(),
            date: Some(date),
        }
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn day_num(&self) -> Option<u32> {
        self.date.map(|date| date.day())
    }

    pub fn is_padding(&self) -> bool {
        self.date.is_none()
    }

    pub fn is_weekend(&self, weekend: &[Weekday]) -> bool {
        weekend.contains(&self.weekday)
    }

    /// Day of month as text, empty for padding.
    pub fn label(&self) -> String {
        self.day_num().map(|day| day.to_string()).unwrap_or_default()
    }
}

impl fmt::Display for DayCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.label())
    }
}

fn empty_week() -> [DayCell; DAYS_PER_WEEK] {
    WEEK.map(DayCell::padding)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaySequence {
    month: MonthIndex,
    cells: Vec<DayCell>,
}

impl DaySequence {
    pub fn month(&self) -> MonthIndex {
        self.month
    }

    pub fn cells(&self) -> &[DayCell] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn num_days(&self) -> usize {
        self.cells.iter().filter(|cell| !cell.is_padding()).count()
    }

    /// One slice of seven cells per calendar week.
    pub fn rows(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(DAYS_PER_WEEK)
    }

    pub fn labels(&self) -> Vec<String> {
        self.cells.iter().map(DayCell::label).collect()
    }
}

impl From<MonthIndex> for DaySequence {
    fn from(month: MonthIndex) -> Self {
        let mut cells = Vec::with_capacity(6 * DAYS_PER_WEEK);
        let mut week = empty_week();

        for date in month.days() {
            let column = weekday_index(date.weekday());
            week[column] = DayCell::day(date);

            if column == DAYS_PER_WEEK - 1 {
                cells.extend_from_slice(&week);
                week = empty_week();
            }
        }

        if week.iter().any(|cell| !cell.is_padding()) {
            cells.extend_from_slice(&week);
        }

        DaySequence { month, cells }
    }
}

/// Builds the day grid of `month` in `year`.
pub fn build(month: Month, year: i32) -> Result<DaySequence> {
    MonthIndex::new(month, year).map(DaySequence::from)
}

impl fmt::Display for DaySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const CELL_WIDTH: usize = 4;
        let width = CELL_WIDTH * DAYS_PER_WEEK;

        writeln!(f, "{:^width$}", self.month, width = width)?;
        writeln!(
            f,
            "{}",
            WEEKDAY_NAMES
                .iter()
                .map(|name| format!("{:>w$}", name, w = CELL_WIDTH))
                .join("")
        )?;

        for row in self.rows() {
            writeln!(
                f,
                "{}",
                row.iter()
                    .map(|cell| format!("{:>w$}", cell, w = CELL_WIDTH))
                    .join("")
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::month::month_from_row;

    fn labels(month: Month, year: i32) -> Vec<String> {
        build(month, year).unwrap().labels()
    }

    fn row(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    fn all_months() -> impl Iterator<Item = (Month, i32)> {
        (1900..=2100).flat_map(|year| (0..12).map(move |row| (month_from_row(row).unwrap(), year)))
    }

    #[test]
    fn length_is_multiple_of_week() {
        for (month, year) in all_months() {
            let days = build(month, year).unwrap();
            assert_eq!(days.len() % DAYS_PER_WEEK, 0, "{}", days.month());
            assert!(days.rows().all(|row| row.len() == DAYS_PER_WEEK));
        }
    }

    #[test]
    fn every_day_once_in_order() {
        for (month, year) in all_months() {
            let days = build(month, year).unwrap();
            let expected: Vec<String> = (1..=days.month().num_days()).map(|d| d.to_string()).collect();
            let found: Vec<String> = days.labels().into_iter().filter(|l| !l.is_empty()).collect();

            assert_eq!(found, expected, "{}", days.month());
            assert_eq!(days.num_days(), expected.len());
        }
    }

    #[test]
    fn position_matches_weekday() {
        for (month, year) in all_months() {
            let days = build(month, year).unwrap();
            for (position, cell) in days.iter().enumerate() {
                assert_eq!(weekday_index(cell.weekday()), position % DAYS_PER_WEEK);
                if let Some(date) = cell.date() {
                    assert_eq!(date.weekday(), cell.weekday());
                    assert_eq!(date.month(), month.number_from_month());
                }
            }
        }
    }

    #[test]
    fn no_empty_rows() {
        for (month, year) in all_months() {
            let days = build(month, year).unwrap();
            assert!(days.rows().all(|row| row.iter().any(|cell| !cell.is_padding())));
        }
    }

    #[test]
    fn idempotent() {
        assert_eq!(build(Month::March, 2025).unwrap(), build(Month::March, 2025).unwrap());
    }

    #[test]
    fn february_leap_year() {
        let labels = labels(Month::February, 2024);

        assert_eq!(labels[..7], row(&["", "", "", "", "1", "2", "3"])[..]);
        assert_eq!(labels.iter().filter(|l| !l.is_empty()).count(), 29);

        let last = labels.iter().position(|l| l == "29").unwrap();
        assert_eq!(last % 7, 4);
        assert_eq!(labels[labels.len() - 7..], row(&["25", "26", "27", "28", "29", "", ""])[..]);
    }

    #[test]
    fn february_common_year() {
        let labels = labels(Month::February, 2023);

        assert_eq!(labels.iter().filter(|l| !l.is_empty()).count(), 28);
        assert_eq!(labels[..7], row(&["", "", "", "1", "2", "3", "4"])[..]);
        // Feb 28 2023 is a Tuesday
        assert_eq!(labels[labels.len() - 7..], row(&["26", "27", "28", "", "", "", ""])[..]);
    }

    #[test]
    fn january_2024() {
        let labels = labels(Month::January, 2024);

        assert_eq!(labels.iter().filter(|l| !l.is_empty()).count(), 31);
        assert_eq!(labels[..7], row(&["", "1", "2", "3", "4", "5", "6"])[..]);
        assert_eq!(labels.len(), 35);
    }

    #[test]
    fn month_ending_on_saturday() {
        // Aug 31 2024 is a Saturday, so there is no trailing padding row
        let labels = labels(Month::August, 2024);

        assert_eq!(labels.last().map(String::as_str), Some("31"));
        assert_eq!(labels.len(), 35);
    }

    #[test]
    fn four_week_february() {
        // Feb 2015 starts on a Sunday and ends on a Saturday
        let days = build(Month::February, 2015).unwrap();

        assert_eq!(days.len(), 28);
        assert!(days.iter().all(|cell| !cell.is_padding()));
    }

    #[test]
    fn six_week_month() {
        // Mar 1 2025 is a Saturday
        let days = build(Month::March, 2025).unwrap();

        assert_eq!(days.rows().count(), 6);
        assert_eq!(days.labels()[6], "1");
    }

    #[test]
    fn weekend_from_weekday() {
        let weekend = [Weekday::Sat, Weekday::Sun];
        let days = build(Month::June, 2024).unwrap();

        for (position, cell) in days.iter().enumerate() {
            let column = position % DAYS_PER_WEEK;
            assert_eq!(cell.is_weekend(&weekend), column == 0 || column == 6);
        }
    }

    #[test]
    fn default_weekend_columns() {
        let weekend = Config::default().weekend;
        let days = build(Month::June, 2024).unwrap();

        let columns: Vec<usize> = days
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_weekend(&weekend))
            .map(|(position, _)| position % DAYS_PER_WEEK)
            .unique()
            .sorted()
            .collect();
        assert_eq!(columns, vec![5, 6]);
    }

    #[test]
    fn text_rendering() {
        let text = build(Month::February, 2024).unwrap().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "February 2024");
        assert_eq!(lines[1], " Sun Mon Tue Wed Thu Fri Sat");
        assert_eq!(lines[2], "                   1   2   3");
        assert_eq!(lines.len(), 2 + 5);
    }
}
