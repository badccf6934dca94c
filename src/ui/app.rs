use std::fmt::Write;

use crate::config::Config;
use crate::events::{Dispatcher, Event};
use crate::selection::Selection;

use super::command::CommandParser;
use super::{Context, Field, Mode, MonthGrid, Picker, PickerBehaviour};

use unsegen::base::{Cursor, GraphemeCluster, Terminal, Window};
use unsegen::input::{EditBehavior, Key, ScrollBehavior};
use unsegen::widget::*;

struct StatusLine<'a> {
    context: &'a Context,
}

impl StatusLine<'_> {
    fn hint(&self) -> String {
        match self.context.mode {
            Mode::Normal => "m/tab: month  y: year  t: today  :: command  q: quit".to_owned(),
            Mode::Picking(field) => format!(
                "j/k: change {}  tab: {} picker  enter: done",
                field,
                field.other()
            ),
            Mode::Command => String::new(),
        }
    }
}

impl Widget for StatusLine<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(10),
            height: RowDemand::exact(1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let mut cursor = Cursor::new(&mut window);
        let result = match &self.context.last_error_message {
            Some(msg) => {
                cursor.set_style_modifier(self.context.theme.error_style);
                write!(&mut cursor, "{}", msg)
            }
            None => write!(&mut cursor, "{}", self.hint()),
        };

        if let Err(err) = result {
            log::warn!("Error while drawing status line: {}", err);
        }
    }
}

pub struct App<'a> {
    config: &'a Config,
    context: Context,
}

impl<'a> App<'a> {
    pub fn new(config: &'a Config, selection: Selection) -> App<'a> {
        let context = Context::new(config, selection);
        App { config, context }
    }

    fn bottom_bar<'w>(&'w self) -> impl Widget + 'w {
        let mut layout = HLayout::new().separator(GraphemeCluster::space());
        if let Mode::Command = self.context.mode {
            layout = layout.widget(self.context.command_line.as_widget());
        } else {
            layout = layout.widget(StatusLine {
                context: &self.context,
            });
        }

        layout
    }

    fn as_widget<'w>(&'w self) -> impl Widget + 'w
    where
        'a: 'w,
    {
        VLayout::new()
            .widget(
                HLayout::new()
                    .separator(GraphemeCluster::space())
                    .widget(Picker::new(Field::Month, &self.context))
                    .widget(Picker::new(Field::Year, &self.context)),
            )
            .widget(MonthGrid::new(&self.context))
            .widget(self.bottom_bar())
    }

    fn handle_input(&mut self, input: unsegen::input::Input, run: &mut bool) {
        if input.matches(Key::Esc) {
            self.context.mode = Mode::Normal;
            return;
        }

        match self.context.mode {
            Mode::Normal => {
                input
                    .chain((Key::Char('q'), || *run = false))
                    .chain((Key::Char(':'), || self.context.mode = Mode::Command))
                    .chain((Key::Char('m'), || {
                        self.context.mode = Mode::Picking(Field::Month)
                    }))
                    .chain((Key::Char('y'), || {
                        self.context.mode = Mode::Picking(Field::Year)
                    }))
                    .chain((Key::Char('\t'), || {
                        self.context.mode = Mode::Picking(Field::Month)
                    }))
                    .chain((Key::Char('t'), || self.context.select_today()))
                    .finish();
            }
            Mode::Picking(field) => {
                input
                    .chain((Key::Char('\n'), || self.context.mode = Mode::Normal))
                    .chain((Key::Char('\t'), || {
                        self.context.mode = Mode::Picking(field.other())
                    }))
                    .chain(
                        ScrollBehavior::new(&mut PickerBehaviour(&mut self.context, field))
                            .forwards_on(Key::Char('j'))
                            .forwards_on(Key::Down)
                            .backwards_on(Key::Char('k'))
                            .backwards_on(Key::Up),
                    )
                    .finish();
            }
            Mode::Command => {
                input
                    .chain(
                        EditBehavior::new(&mut self.context.command_line)
                            .delete_forwards_on(Key::Delete)
                            .delete_backwards_on(Key::Backspace)
                            .left_on(Key::Left)
                            .right_on(Key::Right),
                    )
                    .chain(
                        ScrollBehavior::new(&mut self.context.command_line)
                            .backwards_on(Key::Up)
                            .forwards_on(Key::Down),
                    )
                    .chain(CommandParser::new(&mut self.context, run))
                    .finish();
            }
        }
    }

    pub fn run(
        &mut self,
        dispatcher: Dispatcher,
        mut term: Terminal,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut run = true;

        log::info!(
            "Starting with {} selectable years, weekend {:?}",
            self.config.years.len(),
            self.config.weekend
        );

        while run {
            match dispatcher.next()? {
                Event::Update => self.context.update(),
                Event::Signal => {}
                Event::Input(input) => self.handle_input(input, &mut run),
            }

            let root = term.create_root_window();
            self.as_widget().draw(root, RenderingHints::new());
            term.present();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::Years;
    use chrono::{Month, NaiveDate};
    use unsegen::input::Input;

    fn selection() -> Selection {
        let today = NaiveDate::from_ymd_opt(2024, 2, 17).unwrap();
        Selection::initialize(today, Years::default())
    }

    fn press(app: &mut App, key: Key) -> bool {
        let mut run = true;
        let input = Input {
            event: unsegen::input::Event::Key(key),
            raw: vec![],
        };
        app.handle_input(input, &mut run);
        run
    }

    #[test]
    fn enter_leaves_picker_without_changing_selection() {
        let config = Config::default();
        let mut app = App::new(&config, selection());
        app.context.mode = Mode::Picking(Field::Month);
        let revision = app.context.selection().revision();

        assert!(press(&mut app, Key::Char('\n')));
        assert_eq!(app.context.mode, Mode::Normal);
        assert_eq!(app.context.selection().revision(), revision);
        assert_eq!(app.context.selection().month(), Month::February);
        assert_eq!(app.context.selection().year(), Some(2024));
    }

    #[test]
    fn esc_leaves_picker_without_changing_selection() {
        let config = Config::default();
        let mut app = App::new(&config, selection());
        app.context.mode = Mode::Picking(Field::Year);
        let revision = app.context.selection().revision();

        assert!(press(&mut app, Key::Esc));
        assert_eq!(app.context.mode, Mode::Normal);
        assert_eq!(app.context.selection().revision(), revision);
        assert_eq!(app.context.selection().month(), Month::February);
        assert_eq!(app.context.selection().year(), Some(2024));
    }

    #[test]
    fn normal_mode_keys() {
        let config = Config::default();
        let mut app = App::new(&config, selection());

        press(&mut app, Key::Char('\t'));
        assert_eq!(app.context.mode, Mode::Picking(Field::Month));

        press(&mut app, Key::Esc);
        press(&mut app, Key::Char('y'));
        assert_eq!(app.context.mode, Mode::Picking(Field::Year));

        press(&mut app, Key::Esc);
        press(&mut app, Key::Char('m'));
        assert_eq!(app.context.mode, Mode::Picking(Field::Month));

        press(&mut app, Key::Esc);
        press(&mut app, Key::Char(':'));
        assert_eq!(app.context.mode, Mode::Command);

        press(&mut app, Key::Esc);
        assert!(!press(&mut app, Key::Char('q')));
    }

    #[test]
    fn tab_switches_picker() {
        let config = Config::default();
        let mut app = App::new(&config, selection());
        app.context.mode = Mode::Picking(Field::Month);

        press(&mut app, Key::Char('\t'));
        assert_eq!(app.context.mode, Mode::Picking(Field::Year));
        press(&mut app, Key::Char('\t'));
        assert_eq!(app.context.mode, Mode::Picking(Field::Month));
    }

    #[test]
    fn scrolling_in_picker_selects() {
        let config = Config::default();
        let mut app = App::new(&config, selection());
        app.context.mode = Mode::Picking(Field::Month);
        let revision = app.context.selection().revision();

        press(&mut app, Key::Char('j'));
        assert_eq!(app.context.selection().month(), Month::March);
        assert_eq!(app.context.selection().revision(), revision + 1);

        press(&mut app, Key::Up);
        assert_eq!(app.context.selection().month(), Month::February);
        assert_eq!(app.context.mode, Mode::Picking(Field::Month));
    }
}
