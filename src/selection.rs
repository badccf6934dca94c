use chrono::{Local, Month, NaiveDate};
use serde::Deserialize;

use crate::config::Config;
use crate::error::{Error, ErrorKind, Result};
use crate::grid::DaySequence;
use crate::month::{self, MonthIndex};

/// Years offered by the year picker, in row order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Years(Vec<i32>);

impl Default for Years {
    fn default() -> Self {
        Years(vec![2023, 2024, 2025])
    }
}

impl From<Vec<i32>> for Years {
    fn from(years: Vec<i32>) -> Self {
        Years(years)
    }
}

impl Years {
    pub fn get(&self, row: usize) -> Option<i32> {
        self.0.get(row).copied()
    }

    pub fn position(&self, year: i32) -> Option<usize> {
        self.0.iter().position(|&y| y == year)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.0.contains(&year)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }
}

/// The month and year currently chosen in the pickers together with the day
/// grid derived from them.
///
/// Every accepted change rebuilds the grid from scratch. Rejected input
/// leaves month, year and grid untouched.
#[derive(Debug, Clone)]
pub struct Selection {
    month: Month,
    year: Option<i32>,
    years: Years,
    days: Option<DaySequence>,
    revision: u64,
}

impl Selection {
    /// Selects the month of `today` and, if it is offered by the year
    /// picker, its year. Otherwise no year is selected and there is no grid
    /// until one is picked.
    pub fn initialize(today: NaiveDate, years: Years) -> Self {
        let mut selection = Selection {
            month: Month::January,
            year: None,
            years,
            days: None,
            revision: 0,
        };
        selection.select_today(today);
        selection
    }

    pub fn from_config(config: &Config) -> Self {
        Self::initialize(Local::now().date_naive(), config.years.clone())
    }

    pub fn select_today(&mut self, today: NaiveDate) {
        let current = MonthIndex::from(today);

        self.month = current.month();
        if self.years.contains(current.year()) {
            self.year = Some(current.year());
        } else {
            log::info!(
                "Current year {} is not one of the selectable years, no year preselected",
                current.year()
            );
        }

        self.recompute();
    }

    pub fn select_month(&mut self, month: Month) {
        self.month = month;
        self.recompute();
    }

    /// Selects a month by its English name.
    pub fn set_month(&mut self, name: &str) -> Result<()> {
        let month = month::month_from_name(name)?;
        self.select_month(month);
        Ok(())
    }

    pub fn select_month_row(&mut self, row: usize) -> Result<()> {
        let month = month::month_from_row(row).ok_or_else(|| {
            Error::new(ErrorKind::RowOutOfRange, &format!("no month in row {}", row))
        })?;
        self.select_month(month);
        Ok(())
    }

    pub fn select_year(&mut self, year: i32) -> Result<()> {
        if !month::is_valid_year(year) {
            return Err(Error::new(
                ErrorKind::YearOutOfRange,
                &format!("{} is not a representable year", year),
            ));
        }

        self.year = Some(year);
        self.recompute();
        Ok(())
    }

    /// Selects the year written in `year`. Anything that does not parse as
    /// an integer is rejected without touching the selection.
    pub fn set_year(&mut self, year: &str) -> Result<()> {
        let parsed = year
            .trim()
            .parse::<i32>()
            .map_err(|e| Error::from(e).with_msg(&format!("'{}' is not a number", year)))?;
        self.select_year(parsed)
    }

    pub fn select_year_row(&mut self, row: usize) -> Result<()> {
        let year = self.years.get(row).ok_or_else(|| {
            Error::new(ErrorKind::RowOutOfRange, &format!("no year in row {}", row))
        })?;
        self.select_year(year)
    }

    fn recompute(&mut self) {
        // Years are validated before they are stored
        self.days = self
            .year
            .and_then(|year| MonthIndex::new(self.month, year).ok())
            .map(DaySequence::from);
        self.revision += 1;

        match &self.days {
            Some(days) => log::debug!("Rebuilt grid for {} ({} cells)", days.month(), days.len()),
            None => log::debug!("No year selected, grid cleared"),
        }
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    pub fn years(&self) -> &Years {
        &self.years
    }

    pub fn month_row(&self) -> usize {
        month::month_row(self.month)
    }

    /// Row of the selected year in the year picker, if it is offered there.
    pub fn year_row(&self) -> Option<usize> {
        self.year.and_then(|year| self.years.position(year))
    }

    pub fn days(&self) -> Option<&DaySequence> {
        self.days.as_ref()
    }

    /// Number of accepted selection changes. Each one recomputes the grid,
    /// which stays empty while no year is selected.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
