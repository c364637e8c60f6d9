//! Game events built from sheet rows.

use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Every game is listed in Pacific civil time.
pub const CALENDAR_TZ: Tz = chrono_tz::America::Los_Angeles;

/// Games are blocked out for a fixed length.
pub const GAME_DURATION_HOURS: i64 = 4;

/// Sheet IDs below this are home games, the rest are away games.
pub const HOME_GAME_ID_LIMIT: i64 = 82;

pub fn game_duration() -> Duration {
    Duration::hours(GAME_DURATION_HOURS)
}

/// Home/away convention of the schedule sheet.
pub fn is_home_game(id: i64) -> bool {
    id < HOME_GAME_ID_LIMIT
}

/// One scheduled game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    /// The sheet's ID cell, trimmed and otherwise untouched
    pub uid: String,
    /// `uid` read as an integer, for the home/away split
    pub id: i64,
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    pub opponent: String,
    pub attending: bool,
    pub ticket_count: Option<u32>,
    pub giveaway: Option<String>,
}

impl GameEvent {
    pub fn uid(&self) -> &str {
        &self.uid
    }

    pub fn date(&self) -> NaiveDate {
        self.start.date_naive()
    }

    pub fn is_home(&self) -> bool {
        is_home_game(self.id)
    }

    pub fn start_utc(&self) -> DateTime<Utc> {
        self.start.with_timezone(&Utc)
    }

    pub fn end_utc(&self) -> DateTime<Utc> {
        self.end.with_timezone(&Utc)
    }

    /// `PP (2): vs Dodgers`, `TV: @ Giants`
    ///
    /// `PP` when attending in person, `TV` otherwise.
    pub fn summary(&self) -> String {
        let prefix = if self.attending { "PP" } else { "TV" };
        let tickets = self
            .ticket_count
            .map(|count| format!(" ({count})"))
            .unwrap_or_default();
        let relation = if self.is_home() { "vs" } else { "@" };

        format!("{prefix}{tickets}: {relation} {}", self.opponent)
    }

    pub fn description(&self) -> Option<String> {
        self.giveaway
            .as_ref()
            .map(|giveaway| format!("Giveaway: {giveaway}"))
    }
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn make_test_event(id: i64) -> GameEvent {
        let start = CALENDAR_TZ.with_ymd_and_hms(2026, 4, 10, 19, 10, 0).unwrap();
        GameEvent {
            uid: id.to_string(),
            id,
            start,
            end: start + game_duration(),
            opponent: "Dodgers".to_string(),
            attending: false,
            ticket_count: None,
            giveaway: None,
        }
    }

    #[test]
    fn test_home_game_threshold() {
        assert!(is_home_game(-3));
        assert!(is_home_game(0));
        assert!(is_home_game(81));
        assert!(!is_home_game(82));
        assert!(!is_home_game(162));
    }

    #[test]
    fn test_summary_home_attending_with_tickets() {
        let mut event = make_test_event(5);
        event.attending = true;
        event.ticket_count = Some(2);

        assert_eq!(event.summary(), "PP (2): vs Dodgers");
    }

    #[test]
    fn test_summary_away_on_tv() {
        let mut event = make_test_event(90);
        event.opponent = "Giants".to_string();

        assert_eq!(event.summary(), "TV: @ Giants");
    }

    #[test]
    fn test_description_only_with_giveaway() {
        let mut event = make_test_event(5);
        assert_eq!(event.description(), None);

        event.giveaway = Some("Bobblehead".to_string());
        assert_eq!(event.description().as_deref(), Some("Giveaway: Bobblehead"));
    }

    #[test]
    fn test_utc_conversion_uses_daylight_time() {
        let event = make_test_event(5);

        assert_eq!(
            event.start_utc(),
            Utc.with_ymd_and_hms(2026, 4, 11, 2, 10, 0).unwrap()
        );
        assert_eq!(
            event.end_utc(),
            Utc.with_ymd_and_hms(2026, 4, 11, 6, 10, 0).unwrap()
        );
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2026, 4, 10).unwrap());
    }
}
