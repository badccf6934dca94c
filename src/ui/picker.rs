use std::fmt::Write;

use unsegen::base::*;
use unsegen::input::{OperationResult, Scrollable};
use unsegen::widget::*;

use super::{Context, Field, Mode, Theme};
use crate::month::MONTH_NAMES;

/// A single column list with one highlighted row, standing in for a picker
/// wheel.
pub struct Picker<'a> {
    field: Field,
    rows: Vec<String>,
    selected: Option<usize>,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> Picker<'a> {
    pub fn new(field: Field, context: &'a Context) -> Self {
        let selection = context.selection();
        let (rows, selected) = match field {
            Field::Month => (
                MONTH_NAMES.iter().map(|name| name.to_string()).collect(),
                Some(selection.month_row()),
            ),
            Field::Year => (
                selection.years().iter().map(|year| year.to_string()).collect(),
                selection.year_row(),
            ),
        };

        Picker {
            field,
            rows,
            selected,
            focused: context.mode == Mode::Picking(field),
            theme: &context.theme,
        }
    }

    fn width(&self) -> usize {
        let title = format!("Select {}", self.field).len();
        self.rows
            .iter()
            .map(String::len)
            .chain(std::iter::once(title))
            .max()
            .unwrap_or(0)
            + 2
    }

    fn write_rows(&self, window: &mut Window) -> std::fmt::Result {
        let mut cursor = Cursor::new(window).style_modifier(self.theme.header_style);
        writeln!(&mut cursor, "Select {}", self.field)?;

        for (row, label) in self.rows.iter().enumerate() {
            let saved_style = cursor.get_style_modifier();

            if Some(row) == self.selected {
                cursor.set_style_modifier(if self.focused {
                    self.theme.picker_focus_style
                } else {
                    self.theme.picker_selected_style
                });
            } else {
                cursor.set_style_modifier(StyleModifier::new());
            }

            write!(&mut cursor, " {:<width$}", label, width = self.width() - 1)?;
            cursor.set_style_modifier(saved_style);
            cursor.fill_and_wrap_line();
        }

        Ok(())
    }
}

impl Widget for Picker<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::exact(self.width()),
            height: RowDemand::exact(self.rows.len() + 1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        if let Err(err) = self.write_rows(&mut window) {
            log::warn!("Error while drawing {} picker: {}", self.field, err);
        }
    }
}

/// Moves the highlighted row of the focused picker. Every move selects the
/// new row right away.
pub struct PickerBehaviour<'a>(pub &'a mut Context, pub Field);

impl PickerBehaviour<'_> {
    fn current_row(&self) -> Option<usize> {
        let selection = self.0.selection();
        match self.1 {
            Field::Month => Some(selection.month_row()),
            Field::Year => selection.year_row(),
        }
    }

    fn num_rows(&self) -> usize {
        match self.1 {
            Field::Month => MONTH_NAMES.len(),
            Field::Year => self.0.selection().years().len(),
        }
    }

    fn select_row(&mut self, row: usize) -> OperationResult {
        let selection = self.0.selection_mut();
        let result = match self.1 {
            Field::Month => selection.select_month_row(row),
            Field::Year => selection.select_year_row(row),
        };

        let accepted = result.is_ok();
        self.0.report(result);
        if accepted {
            Ok(())
        } else {
            Err(())
        }
    }
}

impl Scrollable for PickerBehaviour<'_> {
    fn scroll_backwards(&mut self) -> OperationResult {
        match self.current_row() {
            Some(row) if row > 0 => self.select_row(row - 1),
            Some(_) => Err(()),
            None => self.select_row(0),
        }
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        match self.current_row() {
            Some(row) if row + 1 < self.num_rows() => self.select_row(row + 1),
            Some(_) => Err(()),
            None => self.select_row(0),
        }
    }
}
