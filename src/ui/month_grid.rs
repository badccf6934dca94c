use std::fmt::{Display, Write};

use unsegen::base::*;
use unsegen::widget::*;

use super::{Context, Theme};
use crate::grid::{DayCell, DaySequence, DAYS_PER_WEEK, WEEKDAY_NAMES};

const CELL_WIDTH: usize = 4;

struct DayCellView<'a> {
    cell: &'a DayCell,
    is_today: bool,
    theme: &'a Theme,
}

impl Display for DayCellView<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let marker = if self.is_today {
            self.theme.today_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, " {}{:>2}", marker, self.cell)
    }
}

/// Draws the selected month as a Sunday-first table, one row per week.
pub struct MonthGrid<'a> {
    context: &'a Context,
}

impl<'a> MonthGrid<'a> {
    const WIDTH: usize = DAYS_PER_WEEK * CELL_WIDTH;
    const HEADER_ROWS: usize = 2;
    const MAX_WEEKS: usize = 6;

    pub fn new(context: &'a Context) -> Self {
        MonthGrid { context }
    }

    fn write_month(&self, window: &mut Window, days: &DaySequence) -> std::fmt::Result {
        let theme = &self.context.theme;
        let today = self.context.today();

        let mut cursor = Cursor::new(window).style_modifier(theme.title_style);
        writeln!(&mut cursor, "{:^width$}", days.month(), width = Self::WIDTH)?;

        cursor.set_style_modifier(theme.header_style);
        for name in WEEKDAY_NAMES.iter() {
            write!(&mut cursor, "{:>width$}", name, width = CELL_WIDTH)?;
        }
        cursor.fill_and_wrap_line();

        cursor.set_style_modifier(StyleModifier::new());
        for week in days.rows() {
            for cell in week {
                let is_today = cell.date() == Some(today);
                let saved_style = cursor.get_style_modifier();

                if cell.is_weekend(self.context.weekend()) {
                    cursor.apply_style_modifier(theme.weekend_style);
                }
                if is_today {
                    cursor.apply_style_modifier(theme.today_style);
                }

                write!(
                    &mut cursor,
                    "{}",
                    DayCellView {
                        cell,
                        is_today,
                        theme,
                    }
                )?;
                cursor.set_style_modifier(saved_style);
            }
            cursor.fill_and_wrap_line();
        }

        Ok(())
    }
}

impl Widget for MonthGrid<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(Self::WIDTH),
            height: RowDemand::exact(Self::HEADER_ROWS + Self::MAX_WEEKS),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let result = match self.context.selection().days() {
            Some(days) => self.write_month(&mut window, days),
            None => {
                let mut cursor = Cursor::new(&mut window).style_modifier(self.context.theme.title_style);
                write!(&mut cursor, "Select a year to show {}", self.context.selection().month().name())
            }
        };

        if let Err(err) = result {
            log::warn!("Error while drawing month grid: {}", err);
        }
    }
}
