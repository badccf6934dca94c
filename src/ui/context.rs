use chrono::{Local, NaiveDate, Weekday};
use derive_more::Display;

use crate::config::Config;
use crate::error::Result;
use crate::selection::Selection;

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display)]
pub enum Field {
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl Field {
    pub fn other(self) -> Self {
        match self {
            Field::Month => Field::Year,
            Field::Year => Field::Month,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Picking(Field),
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub title_style: StyleModifier,
    pub header_style: StyleModifier,
    pub weekend_style: StyleModifier,
    pub today_style: StyleModifier,
    pub today_char: Option<char>,
    pub picker_selected_style: StyleModifier,
    pub picker_focus_style: StyleModifier,
    pub error_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            title_style: StyleModifier::new().bold(true),
            header_style: StyleModifier::new().fg_color(Color::Yellow),
            weekend_style: StyleModifier::new().bg_color(Color::Magenta),
            today_style: StyleModifier::new().invert(true),
            today_char: Some('*'),
            picker_selected_style: StyleModifier::new().invert(true),
            picker_focus_style: StyleModifier::new().bg_color(Color::Blue),
            error_style: StyleModifier::new().fg_color(Color::LightRed),
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub theme: Theme,
    pub command_line: PromptLine,
    pub last_error_message: Option<String>,
    selection: Selection,
    weekend: Vec<Weekday>,
    today: NaiveDate,
}

impl Context {
    pub fn new(config: &Config, selection: Selection) -> Self {
        Context {
            mode: Mode::Normal,
            theme: Theme::default(),
            command_line: PromptLine::with_prompt(":".to_owned()),
            last_error_message: None,
            selection,
            weekend: config.weekend.clone(),
            today: Local::now().date_naive(),
        }
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut Selection {
        &mut self.selection
    }

    pub fn weekend(&self) -> &[Weekday] {
        &self.weekend
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn update(&mut self) {
        self.today = Local::now().date_naive();
    }

    pub fn select_today(&mut self) {
        self.update();
        let today = self.today;
        self.selection.select_today(today);
    }

    /// Keeps the error of a rejected operation for the status line.
    pub fn report<T>(&mut self, result: Result<T>) {
        match result {
            Ok(_) => self.last_error_message = None,
            Err(err) => {
                log::warn!("{}", err);
                self.last_error_message = Some(err.to_string());
            }
        }
    }
}
