//! Raw sheet rows.
//!
//! Sheet headers are typed by hand and drift ("Going?", "going", "GOING"),
//! so every lookup goes through [`normalize_header`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{SheetCalError, SheetCalResult};

/// A column the normalizer knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    /// Header as it appears in the sheet
    pub label: &'static str,
    pub required: bool,
}

impl Column {
    pub const fn required(label: &'static str) -> Self {
        Column {
            label,
            required: true,
        }
    }

    pub const fn optional(label: &'static str) -> Self {
        Column {
            label,
            required: false,
        }
    }

    pub fn key(&self) -> String {
        normalize_header(self.label)
    }
}

pub const ID: Column = Column::required("ID");
pub const DATE: Column = Column::required("Date");
pub const TIME: Column = Column::required("Time");
pub const TEAM: Column = Column::required("team");
pub const GOING: Column = Column::required("Going?");
pub const GIVEAWAY: Column = Column::optional("Giveaway");
pub const TICKETS: Column = Column::optional("#Tix");

pub const REQUIRED_COLUMNS: [Column; 5] = [ID, DATE, TIME, TEAM, GOING];

/// Lowercase and drop everything that is not an ASCII letter or digit.
pub fn normalize_header(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// One sheet row: normalized header -> trimmed cell text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    cells: HashMap<String, String>,
}

impl Row {
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let cells = pairs
            .into_iter()
            .filter_map(|(header, value)| {
                let key = normalize_header(header.as_ref());
                (!key.is_empty()).then(|| (key, value.as_ref().trim().to_string()))
            })
            .collect();

        Row { cells }
    }

    /// Cell for `column`, `None` when the row has no such column.
    pub fn get(&self, column: Column) -> Option<&str> {
        self.cells.get(&column.key()).map(String::as_str)
    }

    /// Cell for `column`, `None` when absent or blank.
    pub fn non_empty(&self, column: Column) -> Option<&str> {
        self.get(column).filter(|value| !value.is_empty())
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|value| value.is_empty())
    }
}

/// The value grid a source returns. The first row is the header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    pub values: Vec<Vec<String>>,
}

impl Table {
    pub fn new(values: Vec<Vec<String>>) -> Self {
        Table { values }
    }

    pub fn header(&self) -> &[String] {
        self.values.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.values.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pair every data row with the header.
    ///
    /// Fails when the header lacks a required column. Short rows (the Sheets
    /// API drops trailing empty cells) read as blank cells.
    pub fn rows(&self) -> SheetCalResult<Vec<Row>> {
        let header = self.header();
        let keys: Vec<String> = header.iter().map(|h| normalize_header(h)).collect();

        for column in REQUIRED_COLUMNS {
            if !keys.contains(&column.key()) {
                return Err(SheetCalError::MissingColumn(column.label.to_string()));
            }
        }

        let rows = self
            .values
            .iter()
            .skip(1)
            .map(|values| {
                Row::from_pairs(header.iter().enumerate().map(|(idx, h)| {
                    let value = values.get(idx).map(String::as_str).unwrap_or("");
                    (h.as_str(), value)
                }))
            })
            .collect();

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(values: &[&[&str]]) -> Table {
        Table::new(
            values
                .iter()
                .map(|row| row.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_normalize_header_ignores_case_and_punctuation() {
        assert_eq!(normalize_header("Going?"), "going");
        assert_eq!(normalize_header("  #Tix "), "tix");
        assert_eq!(normalize_header("TEAM"), "team");
        assert_eq!(normalize_header("?!"), "");
    }

    #[test]
    fn test_row_lookup_matches_loose_headers() {
        let row = Row::from_pairs([("id", " 7 "), ("GOING", "x"), ("tix", "")]);

        assert_eq!(row.get(ID), Some("7"));
        assert_eq!(row.get(GOING), Some("x"));
        assert_eq!(row.get(TICKETS), Some(""));
        assert_eq!(row.non_empty(TICKETS), None);
        assert_eq!(row.get(GIVEAWAY), None);
    }

    #[test]
    fn test_table_rows_pads_short_rows() {
        let table = table(&[
            &["ID", "Date", "Time", "Team", "Going?", "Giveaway"],
            &["1", "04-01", "07:10 PM", "Rockies"],
        ]);

        let rows = table.rows().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get(TEAM), Some("Rockies"));
        assert_eq!(rows[0].get(GOING), Some(""));
        assert_eq!(rows[0].get(GIVEAWAY), Some(""));
    }

    #[test]
    fn test_table_rows_requires_header_columns() {
        let table = table(&[&["ID", "Date", "Time", "team"], &["1", "04-01", "07:10 PM", "Cubs"]]);

        match table.rows() {
            Err(SheetCalError::MissingColumn(column)) => assert_eq!(column, "Going?"),
            other => panic!("Expected MissingColumn, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_row_detection() {
        assert!(Row::from_pairs([("ID", " "), ("Date", "")]).is_blank());
        assert!(!Row::from_pairs([("ID", "3")]).is_blank());
    }

    #[test]
    fn test_table_deserializes_from_value_grid() {
        let table: Table = serde_json::from_str(r#"[["ID","Date"],["1","04-01"]]"#).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.header(), ["ID".to_string(), "Date".to_string()]);
    }
}
