//! Per-event diff between the published calendar and a fresh render.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::ics::ParsedEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Create,
    Update,
    Delete,
}

impl DiffKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            DiffKind::Create => "+",
            DiffKind::Update => "~",
            DiffKind::Delete => "-",
        }
    }
}

impl fmt::Display for DiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDiff {
    pub kind: DiffKind,
    pub old: Option<ParsedEvent>,
    pub new: Option<ParsedEvent>,
}

impl fmt::Display for EventDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.event().summary)
    }
}

impl EventDiff {
    pub fn get_diff(old: Option<&ParsedEvent>, new: Option<&ParsedEvent>) -> Option<EventDiff> {
        let kind = match (old, new) {
            (None, Some(_)) => DiffKind::Create,
            (Some(_), None) => DiffKind::Delete,
            (Some(old), Some(new)) if old != new => DiffKind::Update,
            _ => return None,
        };

        Some(EventDiff {
            kind,
            old: old.cloned(),
            new: new.cloned(),
        })
    }

    /// Get the event (prefer new, fallback to old)
    pub fn event(&self) -> &ParsedEvent {
        match (&self.new, &self.old) {
            (Some(event), _) | (None, Some(event)) => event,
            (None, None) => unreachable!("EventDiff must have at least one event"),
        }
    }

    /// Names of the properties that differ, for updates.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let (Some(old), Some(new)) = (&self.old, &self.new) else {
            return Vec::new();
        };

        let mut fields = Vec::new();
        if old.start != new.start {
            fields.push("DTSTART");
        }
        if old.end != new.end {
            fields.push("DTEND");
        }
        if old.summary != new.summary {
            fields.push("SUMMARY");
        }
        if old.description != new.description {
            fields.push("DESCRIPTION");
        }
        fields
    }
}

/// What a regeneration would change in the published calendar.
#[derive(Debug, Clone, Default)]
pub struct CalendarDiff {
    pub diffs: Vec<EventDiff>,
}

impl CalendarDiff {
    /// Compare by UID. Creates and updates follow the rendered order,
    /// deletions follow the existing file's order.
    ///
    /// With duplicate UIDs the last occurrence wins on both sides.
    pub fn between(existing: &[ParsedEvent], rendered: &[ParsedEvent]) -> Self {
        let existing_by_uid: HashMap<&str, &ParsedEvent> =
            existing.iter().map(|e| (e.uid.as_str(), e)).collect();
        let rendered_by_uid: HashMap<&str, &ParsedEvent> =
            rendered.iter().map(|e| (e.uid.as_str(), e)).collect();

        let mut seen = HashSet::new();
        let mut diffs = Vec::new();

        for event in rendered {
            if !seen.insert(event.uid.as_str()) {
                continue;
            }
            let new = rendered_by_uid.get(event.uid.as_str()).copied();
            let old = existing_by_uid.get(event.uid.as_str()).copied();
            diffs.extend(EventDiff::get_diff(old, new));
        }

        for event in existing {
            if rendered_by_uid.contains_key(event.uid.as_str()) || !seen.insert(event.uid.as_str()) {
                continue;
            }
            diffs.extend(EventDiff::get_diff(Some(event), None));
        }

        CalendarDiff { diffs }
    }

    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn count(&self, kind: DiffKind) -> usize {
        self.diffs.iter().filter(|d| d.kind == kind).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn parsed(uid: &str, summary: &str) -> ParsedEvent {
        let start = Utc.with_ymd_and_hms(2026, 4, 11, 2, 10, 0).unwrap();
        ParsedEvent {
            uid: uid.to_string(),
            start,
            end: start + chrono::Duration::hours(4),
            summary: summary.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_between_identical_calendars_is_empty() {
        let events = vec![parsed("5", "TV: vs Dodgers"), parsed("90", "TV: @ Giants")];

        let diff = CalendarDiff::between(&events, &events);

        assert!(diff.is_empty(), "Got: {:?}", diff);
    }

    #[test]
    fn test_between_detects_create_update_delete() {
        let existing = vec![parsed("5", "TV: vs Dodgers"), parsed("6", "TV: vs Rockies")];
        let rendered = vec![parsed("5", "PP (2): vs Dodgers"), parsed("90", "TV: @ Giants")];

        let diff = CalendarDiff::between(&existing, &rendered);
        let kinds: Vec<(DiffKind, &str)> = diff
            .diffs
            .iter()
            .map(|d| (d.kind, d.event().uid.as_str()))
            .collect();

        assert_eq!(
            kinds,
            vec![
                (DiffKind::Update, "5"),
                (DiffKind::Create, "90"),
                (DiffKind::Delete, "6"),
            ]
        );
        assert_eq!(diff.count(DiffKind::Update), 1);
        assert_eq!(diff.diffs[0].changed_fields(), vec!["SUMMARY"]);
    }

    #[test]
    fn test_event_diff_display() {
        let diff = EventDiff::get_diff(None, Some(&parsed("90", "TV: @ Giants"))).unwrap();
        assert_eq!(diff.to_string(), "+ TV: @ Giants");
    }
}
