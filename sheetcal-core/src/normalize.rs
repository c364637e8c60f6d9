//! Row normalization: sheet rows in, validated game events out.

use std::collections::HashSet;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use tracing::{debug, warn};

use crate::config::SeasonConfig;
use crate::error::ValidationError;
use crate::event::{CALENDAR_TZ, GameEvent, game_duration};
use crate::row::{Column, DATE, GIVEAWAY, GOING, ID, Row, TEAM, TICKETS, TIME};

/// Checkbox values that count as "going". Compared case-insensitively.
const TRUTHY_VALUES: [&str; 6] = ["true", "yes", "y", "1", "checked", "x"];

pub fn is_truthy(value: &str) -> bool {
    let value = value.trim();
    TRUTHY_VALUES
        .iter()
        .any(|truthy| truthy.eq_ignore_ascii_case(value))
}

/// Turns sheet rows into [`GameEvent`]s for one season.
#[derive(Debug, Clone)]
pub struct Normalizer {
    year: i32,
}

impl Normalizer {
    pub fn new(season: &SeasonConfig) -> Self {
        Normalizer { year: season.year }
    }

    /// Normalize every row, keeping input order.
    ///
    /// Invalid rows are logged and dropped; they never fail the run.
    pub fn normalize(&self, rows: &[Row]) -> Vec<GameEvent> {
        let mut events = Vec::with_capacity(rows.len());
        let mut seen_ids = HashSet::new();

        for (idx, row) in rows.iter().enumerate() {
            // Sheet row number, counting the header as row 1
            let row_number = idx + 2;

            match self.normalize_row(row) {
                Ok(Some(event)) => {
                    if !seen_ids.insert(event.uid.clone()) {
                        warn!(row = row_number, id = %event.uid, "duplicate ID, UID will repeat");
                    }
                    events.push(event);
                }
                Ok(None) => debug!(row = row_number, "skipping blank row"),
                Err(err) => warn!(row = row_number, reason = %err, "skipping row"),
            }
        }

        events
    }

    /// Build the event for one row. `Ok(None)` for an entirely blank row.
    pub fn normalize_row(&self, row: &Row) -> Result<Option<GameEvent>, ValidationError> {
        if row.is_blank() {
            return Ok(None);
        }

        let id_raw = required(row, ID)?;
        let date_raw = required(row, DATE)?;
        let time_raw = required(row, TIME)?;
        let opponent = required(row, TEAM)?;
        // An unticked checkbox exports as an empty cell, so only absence is an error
        let going = row
            .get(GOING)
            .ok_or(ValidationError::MissingField(GOING.label))?;

        let id = id_raw
            .parse::<i64>()
            .map_err(|_| ValidationError::InvalidId(id_raw.to_string()))?;

        let local = self.parse_local_datetime(date_raw, time_raw)?;
        let start = CALENDAR_TZ
            .from_local_datetime(&local)
            .earliest()
            .ok_or_else(|| ValidationError::NonexistentLocalTime(local.to_string()))?;

        let ticket_count = row
            .non_empty(TICKETS)
            .map(|tix| {
                tix.parse::<u32>()
                    .map_err(|_| ValidationError::InvalidTicketCount(tix.to_string()))
            })
            .transpose()?;

        let giveaway = row.non_empty(GIVEAWAY).map(str::to_string);

        Ok(Some(GameEvent {
            uid: id_raw.to_string(),
            id,
            start,
            end: start + game_duration(),
            opponent: opponent.to_string(),
            attending: is_truthy(going),
            ticket_count,
            giveaway,
        }))
    }

    fn parse_local_datetime(
        &self,
        date_raw: &str,
        time_raw: &str,
    ) -> Result<NaiveDateTime, ValidationError> {
        let date = NaiveDate::parse_from_str(&format!("{date_raw}-{}", self.year), "%m-%d-%Y")
            .map_err(|_| ValidationError::InvalidDate(date_raw.to_string()))?;

        let time = NaiveTime::parse_from_str(time_raw, "%I:%M %p")
            .map_err(|_| ValidationError::InvalidTime(time_raw.to_string()))?;

        Ok(date.and_time(time))
    }
}

fn required(row: &Row, column: Column) -> Result<&str, ValidationError> {
    row.non_empty(column)
        .ok_or(ValidationError::MissingField(column.label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Timelike, Utc};

    fn normalizer() -> Normalizer {
        Normalizer::new(&SeasonConfig::default())
    }

    fn game_row(id: &str, date: &str, time: &str, team: &str, going: &str) -> Row {
        Row::from_pairs([
            ("ID", id),
            ("Date", date),
            ("Time", time),
            ("team", team),
            ("Going?", going),
        ])
    }

    #[test]
    fn test_home_game_with_tickets() {
        let row = Row::from_pairs([
            ("ID", "5"),
            ("Date", "04-10"),
            ("Time", "07:10 PM"),
            ("team", "Dodgers"),
            ("Going?", "TRUE"),
            ("#Tix", "2"),
        ]);

        let event = normalizer().normalize_row(&row).unwrap().unwrap();

        assert_eq!(event.id, 5);
        assert_eq!(event.uid(), "5");
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2026, 4, 10).unwrap());
        assert_eq!(event.start, CALENDAR_TZ.with_ymd_and_hms(2026, 4, 10, 19, 10, 0).unwrap());
        assert_eq!(event.end, CALENDAR_TZ.with_ymd_and_hms(2026, 4, 10, 23, 10, 0).unwrap());
        assert_eq!(event.summary(), "PP (2): vs Dodgers");
        assert_eq!(event.description(), None);
    }

    #[test]
    fn test_away_game_not_going() {
        let row = game_row("90", "06-01", "01:00 PM", "Giants", "");

        let event = normalizer().normalize_row(&row).unwrap().unwrap();

        assert!(!event.attending);
        assert_eq!(event.start.hour(), 13);
        assert_eq!(event.summary(), "TV: @ Giants");
    }

    #[test]
    fn test_uid_is_the_id_cell_verbatim() {
        let row = game_row(" 05 ", "04-10", "07:10 PM", "Dodgers", "");

        let event = normalizer().normalize_row(&row).unwrap().unwrap();

        assert_eq!(event.uid(), "05", "Leading zero must survive");
        assert_eq!(event.id, 5);

        let event = normalizer()
            .normalize_row(&game_row("+7", "04-10", "07:10 PM", "Dodgers", ""))
            .unwrap()
            .unwrap();
        assert_eq!(event.uid(), "+7");
    }

    #[test]
    fn test_negative_id_is_a_home_game() {
        let row = game_row("-3", "04-10", "07:10 PM", "Dodgers", "");

        let event = normalizer().normalize_row(&row).unwrap().unwrap();

        assert_eq!(event.uid(), "-3");
        assert!(event.is_home());
        assert_eq!(event.summary(), "TV: vs Dodgers");
    }

    #[test]
    fn test_invalid_date_is_rejected() {
        let row = game_row("7", "13-40", "07:10 PM", "Padres", "TRUE");

        assert_eq!(
            normalizer().normalize_row(&row),
            Err(ValidationError::InvalidDate("13-40".to_string()))
        );
    }

    #[test]
    fn test_invalid_fields_are_rejected() {
        let n = normalizer();

        assert_eq!(
            n.normalize_row(&game_row("abc", "04-10", "07:10 PM", "Cubs", "")),
            Err(ValidationError::InvalidId("abc".to_string()))
        );
        assert_eq!(
            n.normalize_row(&game_row("3", "04-10", "19:10", "Cubs", "")),
            Err(ValidationError::InvalidTime("19:10".to_string()))
        );
        assert_eq!(
            n.normalize_row(&game_row("3", "04-10", "07:10 PM", "", "")),
            Err(ValidationError::MissingField("team"))
        );
    }

    #[test]
    fn test_missing_going_column_is_rejected() {
        let row = Row::from_pairs([
            ("ID", "5"),
            ("Date", "04-10"),
            ("Time", "07:10 PM"),
            ("team", "Dodgers"),
        ]);

        assert_eq!(
            normalizer().normalize_row(&row),
            Err(ValidationError::MissingField("Going?"))
        );
    }

    #[test]
    fn test_non_numeric_ticket_count_is_rejected() {
        let row = Row::from_pairs([
            ("ID", "5"),
            ("Date", "04-10"),
            ("Time", "07:10 PM"),
            ("team", "Dodgers"),
            ("Going?", "x"),
            ("#Tix", "two"),
        ]);

        assert_eq!(
            normalizer().normalize_row(&row),
            Err(ValidationError::InvalidTicketCount("two".to_string()))
        );
    }

    #[test]
    fn test_time_in_spring_forward_gap_is_rejected() {
        // 2026-03-08 02:30 does not exist in Los Angeles
        let row = game_row("2", "03-08", "02:30 AM", "Mariners", "");

        assert!(matches!(
            normalizer().normalize_row(&row),
            Err(ValidationError::NonexistentLocalTime(_))
        ));
    }

    #[test]
    fn test_blank_row_is_skipped_without_error() {
        let row = game_row("", "", "", "", "");
        assert_eq!(normalizer().normalize_row(&row), Ok(None));
    }

    #[test]
    fn test_giveaway_and_ticket_columns_are_optional() {
        let row = Row::from_pairs([
            ("id", "12"),
            ("DATE", "05-02"),
            ("time", "6:40 pm"),
            ("Team", "Brewers"),
            ("going", "yes"),
            ("GIVEAWAY", "Bucket Hat"),
        ]);

        let event = normalizer().normalize_row(&row).unwrap().unwrap();

        assert_eq!(event.ticket_count, None);
        assert_eq!(event.giveaway.as_deref(), Some("Bucket Hat"));
        assert_eq!(event.summary(), "PP: vs Brewers");
        assert_eq!(event.description().as_deref(), Some("Giveaway: Bucket Hat"));
    }

    #[test]
    fn test_truthy_values() {
        for value in ["TRUE", "true", "Yes", "y", "1", "checked", "X", " x "] {
            assert!(is_truthy(value), "{value:?} should be truthy");
        }
        for value in ["", "FALSE", "no", "0", "maybe"] {
            assert!(!is_truthy(value), "{value:?} should be falsy");
        }
    }

    #[test]
    fn test_normalize_keeps_order_and_drops_bad_rows() {
        let rows = vec![
            game_row("90", "06-01", "01:00 PM", "Giants", ""),
            game_row("7", "13-40", "07:10 PM", "Padres", "TRUE"),
            game_row("", "", "", "", ""),
            game_row("5", "04-10", "07:10 PM", "Dodgers", "TRUE"),
        ];

        let events = normalizer().normalize(&rows);
        let ids: Vec<i64> = events.iter().map(|e| e.id).collect();

        assert_eq!(ids, vec![90, 5], "Input order must be preserved");
    }

    #[test]
    fn test_normalize_keeps_duplicate_ids() {
        let rows = vec![
            game_row("5", "04-10", "07:10 PM", "Dodgers", ""),
            game_row("5", "04-11", "07:10 PM", "Dodgers", ""),
        ];

        let events = normalizer().normalize(&rows);

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].uid(), events[1].uid());
    }

    #[test]
    fn test_season_year_comes_from_config() {
        let normalizer = Normalizer::new(&SeasonConfig { year: 2027 });
        let row = game_row("5", "04-10", "07:10 PM", "Dodgers", "");

        let event = normalizer.normalize_row(&row).unwrap().unwrap();

        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2027, 4, 10).unwrap());
        assert!(event.start_utc() > Utc.with_ymd_and_hms(2027, 1, 1, 0, 0, 0).unwrap());
    }
}
