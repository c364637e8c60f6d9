//! ICS file generation.

use chrono::{DateTime, Utc};

use crate::error::{SheetCalError, SheetCalResult};
use crate::event::GameEvent;

use super::CalendarMetadata;

/// RFC 5545 content lines are limited to 75 octets, excluding the CRLF.
const MAX_LINE_OCTETS: usize = 75;

/// Render the whole calendar.
///
/// Output depends only on the events and metadata (DTSTAMP is the event
/// start, not the clock), so unchanged input renders byte-identical text.
pub fn render_calendar(events: &[GameEvent], metadata: &CalendarMetadata) -> SheetCalResult<String> {
    let mut lines: Vec<String> = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        text_property("PRODID", &metadata.prodid),
        "CALSCALE:GREGORIAN".to_string(),
        "METHOD:PUBLISH".to_string(),
    ];

    // X-WR-CALNAME - Human-readable calendar name (de facto standard)
    if let Some(ref name) = metadata.calendar_name {
        lines.push(text_property("X-WR-CALNAME", name));
    }

    for event in events {
        push_event(&mut lines, event)?;
    }

    lines.push("END:VCALENDAR".to_string());

    let mut output = String::with_capacity(lines.iter().map(|l| l.len() + 2).sum());
    for line in &lines {
        output.push_str(&fold_line(line));
        output.push_str("\r\n");
    }

    Ok(output)
}

fn push_event(lines: &mut Vec<String>, event: &GameEvent) -> SheetCalResult<()> {
    if event.end <= event.start {
        return Err(SheetCalError::Render(format!(
            "event {} ends before it starts",
            event.uid
        )));
    }

    let start = event.start_utc();

    lines.push("BEGIN:VEVENT".to_string());
    lines.push(text_property("UID", event.uid()));
    lines.push(format!("DTSTAMP:{}", format_utc(&start)));
    lines.push(format!("DTSTART:{}", format_utc(&start)));
    lines.push(format!("DTEND:{}", format_utc(&event.end_utc())));
    lines.push(text_property("SUMMARY", &event.summary()));
    if let Some(description) = event.description() {
        lines.push(text_property("DESCRIPTION", &description));
    }
    lines.push("END:VEVENT".to_string());

    Ok(())
}

fn text_property(name: &str, value: &str) -> String {
    format!("{name}:{}", escape_text(value))
}

/// UTC datetime with Z suffix
pub fn format_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Escape a TEXT value per RFC 5545 §3.3.11.
pub fn escape_text(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            ';' => escaped.push_str("\\;"),
            ',' => escaped.push_str("\\,"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {
                // CRLF collapses to a single escaped newline
                if chars.peek() != Some(&'\n') {
                    escaped.push_str("\\n");
                }
            }
            _ => escaped.push(c),
        }
    }

    escaped
}

/// Fold a content line at 75 octets, continuing with CRLF + space.
///
/// Splits only on char boundaries so multi-byte UTF-8 stays intact.
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut width = 0;

    for c in line.chars() {
        let len = c.len_utf8();
        if width + len > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            // The leading space counts toward the continuation line
            width = 1;
        }
        folded.push(c);
        width += len;
    }

    folded
}
