use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{space0, space1},
    combinator::{all_consuming, map, rest, value},
    sequence::{delimited, preceded, tuple},
    IResult,
};
use unsegen::input::*;

use super::context::{Context, Mode};
use crate::error::Result;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Month(String),
    Year(String),
    Today,
    Quit,
}

fn with_argument<'a>(
    names: (&'static str, &'static str),
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    preceded(tuple((alt((tag(names.0), tag(names.1))), space1)), rest)
}

fn command(input: &str) -> IResult<&str, Command> {
    delimited(
        space0,
        alt((
            map(with_argument(("month", "m")), |arg: &str| {
                Command::Month(arg.trim().to_owned())
            }),
            map(with_argument(("year", "y")), |arg: &str| {
                Command::Year(arg.trim().to_owned())
            }),
            value(Command::Today, alt((tag("today"), tag("t")))),
            value(Command::Quit, alt((tag("quit"), tag("q")))),
        )),
        space0,
    )(input)
}

/// Parses a command line such as `month March`, `y 2024`, `today` or `q`.
pub fn parse_command(line: &str) -> Result<Command> {
    let (_, cmd) = all_consuming(command)(line)?;
    Ok(cmd)
}

pub struct CommandParser<'a> {
    context: &'a mut Context,
    quit: &'a mut bool,
}

impl<'a> CommandParser<'a> {
    pub fn new(context: &'a mut Context, quit: &'a mut bool) -> Self {
        CommandParser { context, quit }
    }

    pub fn run_command(&mut self, line: &str) -> Result<()> {
        match parse_command(line)? {
            Command::Month(name) => self.context.selection_mut().set_month(&name),
            Command::Year(year) => self.context.selection_mut().set_year(&year),
            Command::Today => {
                self.context.select_today();
                Ok(())
            }
            Command::Quit => {
                *self.quit = true;
                Ok(())
            }
        }
    }
}

impl Behavior for CommandParser<'_> {
    fn input(mut self, input: Input) -> Option<Input> {
        if let Event::Key(Key::Char('\n')) = input.event {
            let line = self.context.command_line.finish_line().to_owned();
            let result = self.run_command(&line);
            let accepted = result.is_ok();

            self.context.report(result);
            if accepted {
                self.context.mode = Mode::Normal;
            }
            None
        } else {
            Some(input)
        }
    }
}
