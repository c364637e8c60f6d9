//! ICS file parsing using the icalendar crate's parser.

use chrono::{DateTime, Utc};
use icalendar::{
    CalendarDateTime, DatePerhapsTime,
    parser::{Component, read_calendar, unfold},
};

/// An event read back from a published calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEvent {
    pub uid: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub summary: String,
    pub description: Option<String>,
}

/// Parse every VEVENT in `content`.
///
/// Returns `None` when the text is not a calendar at all. Events without a
/// UID or a UTC start/end are skipped; sheetcal never writes those.
pub fn parse_calendar(content: &str) -> Option<Vec<ParsedEvent>> {
    let unfolded = unfold(content);
    let calendar = read_calendar(&unfolded).ok()?;

    let events = calendar
        .components
        .iter()
        .filter(|c| c.name == "VEVENT")
        .filter_map(parse_event)
        .collect();

    Some(events)
}

fn parse_event(vevent: &Component) -> Option<ParsedEvent> {
    let uid = unescape_text(vevent.find_prop("UID")?.val.as_ref());
    let start = to_utc(DatePerhapsTime::try_from(vevent.find_prop("DTSTART")?).ok()?)?;
    let end = to_utc(DatePerhapsTime::try_from(vevent.find_prop("DTEND")?).ok()?)?;

    let summary = vevent
        .find_prop("SUMMARY")
        .map(|p| unescape_text(p.val.as_ref()))
        .unwrap_or_default();
    let description = vevent
        .find_prop("DESCRIPTION")
        .map(|p| unescape_text(p.val.as_ref()));

    Some(ParsedEvent {
        uid,
        start,
        end,
        summary,
        description,
    })
}

fn to_utc(dpt: DatePerhapsTime) -> Option<DateTime<Utc>> {
    match dpt {
        DatePerhapsTime::DateTime(CalendarDateTime::Utc(dt)) => Some(dt),
        _ => None,
    }
}

/// Unescape ICS property values per RFC 5545
/// Reverses: \, → , and \; → ; and \\ → \ and \n → newline
fn unescape_text(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some(&(next @ (',' | ';' | '\\'))) => {
                    result.push(next);
                    chars.next();
                }
                Some('n') | Some('N') => {
                    result.push('\n');
                    chars.next();
                }
                _ => result.push(c), // Keep backslash if not a recognized escape
            }
        } else {
            result.push(c);
        }
    }

    result
}
