//! Terminal rendering for sheetcal types, colored with owo_colors.

use owo_colors::OwoColorize;
use sheetcal_core::diff::{CalendarDiff, DiffKind, EventDiff};
use sheetcal_core::event::CALENDAR_TZ;
use sheetcal_core::output::OutputFile;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for DiffKind {
    fn render(&self) -> String {
        colorize_diff(*self, self.symbol())
    }
}

/// Colorize text according to the diff kind
fn colorize_diff(kind: DiffKind, text: &str) -> String {
    match kind {
        DiffKind::Create => text.green().to_string(),
        DiffKind::Update => text.yellow().to_string(),
        DiffKind::Delete => text.red().to_string(),
    }
}

impl Render for EventDiff {
    fn render(&self) -> String {
        let event = self.event();
        let summary = colorize_diff(self.kind, &event.summary);
        let time = event
            .start
            .with_timezone(&CALENDAR_TZ)
            .format("%a %b %-d, %-I:%M %p")
            .to_string();

        let uid = format!("#{}", event.uid);

        format!("{} {} {} {}", self.kind.render(), summary, time.dimmed(), uid.dimmed())
    }
}

impl Render for OutputFile {
    fn render(&self) -> String {
        format!("📅 {}", self.path().display())
    }
}

/// Threshold for compact view (show counts instead of individual events)
const COMPACT_THRESHOLD: usize = 20;

/// Render a calendar diff, collapsing to counts when it is large.
pub fn render_diff(diff: &CalendarDiff) -> Vec<String> {
    let mut lines = Vec::new();

    if diff.diffs.len() <= COMPACT_THRESHOLD {
        for event_diff in &diff.diffs {
            lines.push(format!("   {}", event_diff.render()));
            if event_diff.kind == DiffKind::Update {
                let fields = event_diff.changed_fields().join(", ");
                lines.push(format!("      {}", fields.dimmed()));
            }
        }
        return lines;
    }

    for (kind, label) in [
        (DiffKind::Create, "new"),
        (DiffKind::Update, "changed"),
        (DiffKind::Delete, "removed"),
    ] {
        let count = diff.count(kind);
        if count > 0 {
            let text = format!("({} {} {})", count, label, pluralize("event", count));
            lines.push(format!("   {} {}", kind.render(), colorize_diff(kind, &text)));
        }
    }

    lines
}

fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize("event", 1), "event");
        assert_eq!(pluralize("event", 3), "events");
    }

    #[test]
    fn test_render_diff_empty() {
        assert!(render_diff(&CalendarDiff::default()).is_empty());
    }
}
