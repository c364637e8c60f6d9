//! ICS file generation and parsing.
//!
//! This module handles reading and writing .ics files according to RFC 5545.

mod generate;
mod parse;

pub use generate::{escape_text, fold_line, format_utc, render_calendar};
pub use parse::{ParsedEvent, parse_calendar};

use crate::config::OutputConfig;

/// Calendar-level properties written ahead of the events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMetadata {
    pub prodid: String,
    /// X-WR-CALNAME, shown by most clients as the subscription name
    pub calendar_name: Option<String>,
}

impl From<&OutputConfig> for CalendarMetadata {
    fn from(output: &OutputConfig) -> Self {
        CalendarMetadata {
            prodid: output.prodid.clone(),
            calendar_name: output.calendar_name.clone(),
        }
    }
}
