use chrono::{Datelike, Duration, Month, NaiveDate};
use num_traits::FromPrimitive;
use phf::phf_map;
use std::fmt;

use crate::error::{Error, ErrorKind, Result};

/// Month names in picker order.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS: [Month; 12] = [
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
    Month::November,
    Month::December,
];

static MONTHS_BY_NAME: phf::Map<&'static str, Month> = phf_map! {
    "january" => Month::January,
    "february" => Month::February,
    "march" => Month::March,
    "april" => Month::April,
    "may" => Month::May,
    "june" => Month::June,
    "july" => Month::July,
    "august" => Month::August,
    "september" => Month::September,
    "october" => Month::October,
    "november" => Month::November,
    "december" => Month::December,
};

/// Looks up one of the twelve English month names, ignoring case.
pub fn month_from_name(name: &str) -> Result<Month> {
    MONTHS_BY_NAME
        .get(name.trim().to_lowercase().as_str())
        .copied()
        .ok_or_else(|| {
            Error::new(
                ErrorKind::UnknownMonth,
                &format!("'{}' is not one of {}", name, MONTH_NAMES.join(", ")),
            )
        })
}

pub fn month_from_row(row: usize) -> Option<Month> {
    Month::from_usize(row + 1)
}

pub fn month_row(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

pub fn month_name(month: Month) -> &'static str {
    MONTH_NAMES[month_row(month)]
}

/// True if every month of `year` can be represented as a calendar date.
pub fn is_valid_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some() && NaiveDate::from_ymd_opt(year, 12, 31).is_some()
}

/// A month of a specific year, anchored at its first day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthIndex {
    month: Month,
    first_day: NaiveDate,
}

impl MonthIndex {
    pub fn new(month: Month, year: i32) -> Result<Self> {
        NaiveDate::from_ymd_opt(year, month.number_from_month(), 1)
            .map(|first_day| MonthIndex { month, first_day })
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::YearOutOfRange,
                    &format!("{} {} is not a representable date", month_name(month), year),
                )
            })
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// All days of the month in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let month = self.first_day.month();
        self.first_day
            .iter_days()
            .take_while(move |date| date.month() == month)
    }

    pub fn num_days(&self) -> u32 {
        self.days().count() as u32
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        date.year() == self.year() && date.month() == self.first_day.month()
    }
}

impl From<NaiveDate> for MonthIndex {
    fn from(date: NaiveDate) -> Self {
        MonthIndex {
            month: MONTHS[date.month0() as usize],
            first_day: date - Duration::days(date.day0() as i64),
        }
    }
}

impl fmt::Display for MonthIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&format!("{} {}", month_name(self.month), self.year()))
    }
}
