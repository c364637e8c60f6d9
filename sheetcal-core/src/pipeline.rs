//! One generator run: rows -> events -> ICS text -> output file.

use tracing::info;

use crate::config::SheetCalConfig;
use crate::diff::CalendarDiff;
use crate::error::{SheetCalError, SheetCalResult};
use crate::event::GameEvent;
use crate::ics::{CalendarMetadata, parse_calendar, render_calendar};
use crate::normalize::Normalizer;
use crate::output::{OutputFile, WriteOutcome};
use crate::row::Table;

/// A rendered calendar and the events it was built from.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub events: Vec<GameEvent>,
    /// Non-blank data rows in the sheet, including the ones that were rejected
    pub row_count: usize,
    pub ics: String,
}

impl Rendered {
    pub fn skipped(&self) -> usize {
        self.row_count.saturating_sub(self.events.len())
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub rendered: Rendered,
    /// `None` for dry runs
    pub outcome: Option<WriteOutcome>,
    pub needs_write: bool,
}

#[derive(Debug, Clone)]
pub struct Generator {
    normalizer: Normalizer,
    metadata: CalendarMetadata,
    output: OutputFile,
}

impl Generator {
    pub fn new(config: &SheetCalConfig) -> Self {
        Generator {
            normalizer: Normalizer::new(&config.season),
            metadata: CalendarMetadata::from(&config.output),
            output: OutputFile::new(config.output.resolved_path()),
        }
    }

    pub fn output(&self) -> &OutputFile {
        &self.output
    }

    pub fn render(&self, table: &Table) -> SheetCalResult<Rendered> {
        let rows = table.rows()?;
        let events = self.normalizer.normalize(&rows);
        let ics = render_calendar(&events, &self.metadata)?;

        Ok(Rendered {
            events,
            row_count: rows.iter().filter(|row| !row.is_blank()).count(),
            ics,
        })
    }

    /// Render and write the calendar if it changed. `dry_run` only reports.
    pub fn run(&self, table: &Table, dry_run: bool) -> SheetCalResult<RunReport> {
        let rendered = self.render(table)?;

        let (outcome, needs_write) = if dry_run {
            (None, self.output.needs_write(&rendered.ics)?)
        } else {
            let outcome = self.output.write_if_changed(&rendered.ics)?;
            (Some(outcome), outcome.changed())
        };

        info!(
            events = rendered.events.len(),
            skipped = rendered.skipped(),
            needs_write,
            dry_run,
            "calendar generated"
        );

        Ok(RunReport {
            rendered,
            outcome,
            needs_write,
        })
    }

    /// Compare a fresh render against the published file.
    pub fn diff(&self, rendered: &Rendered) -> SheetCalResult<CalendarDiff> {
        let existing_text = self.output.read_existing()?;
        let existing = if existing_text.is_empty() {
            Vec::new()
        } else {
            existing_text
                .trim_start()
                .starts_with("BEGIN:VCALENDAR")
                .then(|| parse_calendar(&existing_text))
                .flatten()
                .ok_or_else(|| {
                    SheetCalError::UnreadableCalendar(self.output.path().display().to_string())
                })?
        };

        let fresh = parse_calendar(&rendered.ics).ok_or_else(|| {
            SheetCalError::Render("rendered calendar could not be parsed back".into())
        })?;

        Ok(CalendarDiff::between(&existing, &fresh))
    }
}
