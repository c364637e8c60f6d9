//! Core of sheetcal: turns a spreadsheet schedule into a published .ics file.
//!
//! - `source` fetches the sheet's value grid (provider binary or JSON export)
//! - `normalize` turns rows into validated `GameEvent`s
//! - `ics` renders and parses calendar text
//! - `output` writes the calendar only when its content changed

pub mod config;
pub mod diff;
pub mod error;
pub mod event;
pub mod ics;
pub mod normalize;
pub mod output;
pub mod pipeline;
pub mod row;
pub mod source;

pub use config::SheetCalConfig;
pub use error::{SheetCalError, SheetCalResult, ValidationError};
pub use event::GameEvent;
pub use pipeline::Generator;
