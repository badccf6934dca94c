pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod month;
pub mod selection;
pub mod ui;

pub use error::{Error, ErrorKind, Result};
