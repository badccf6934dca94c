mod app;
mod command;
mod context;
mod month_grid;
mod picker;

pub use app::App;
pub use command::{parse_command, Command};
pub use context::{Context, Field, Mode, Theme};
pub use month_grid::MonthGrid;
pub use picker::{Picker, PickerBehaviour};
