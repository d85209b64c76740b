use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::error::SchemaError;
use super::model::{CellValue, Table};

pub const LOCATION_COLUMN: &str = "location";
pub const DATE_COLUMN: &str = "date";

/// The columns every selected table is projected onto, in output order.
pub const ANALYSIS_COLUMNS: [&str; 8] = [
    LOCATION_COLUMN,
    DATE_COLUMN,
    "total_cases",
    "new_cases",
    "total_deaths",
    "new_deaths",
    "total_cases_per_million",
    "total_deaths_per_million",
];

const DATE_FORMAT: &str = "%Y-%m-%d";

// ---------------------------------------------------------------------------
// Selection predicate: one location, closed date interval
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    pub location: String,
    /// First day included.
    pub start: NaiveDate,
    /// Last day included.
    pub end: NaiveDate,
}

impl Default for Selection {
    fn default() -> Self {
        Selection {
            location: "Ecuador".to_string(),
            start: NaiveDate::from_ymd_opt(2020, 4, 1).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2020, 8, 31).unwrap_or_default(),
        }
    }
}

impl Selection {
    pub fn contains(&self, location: &str, date: NaiveDate) -> bool {
        location == self.location && self.start <= date && date <= self.end
    }
}

/// Parse an ISO `YYYY-MM-DD` cell. Month and day must be zero-padded and
/// nothing may surround the date.
pub fn parse_date(cell: &CellValue) -> Option<NaiveDate> {
    let s = cell.as_str()?;
    let date = NaiveDate::parse_from_str(s, DATE_FORMAT).ok()?;
    (date.format(DATE_FORMAT).to_string() == s).then_some(date)
}

// ---------------------------------------------------------------------------
// FilteredTable
// ---------------------------------------------------------------------------

/// A table holding only [`ANALYSIS_COLUMNS`], every row of which matched a
/// [`Selection`]. Rows keep their source order.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredTable {
    table: Table,
}

impl FilteredTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn into_table(self) -> Table {
        self.table
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Keep the rows of `table` for one location inside the closed date range,
/// projected onto [`ANALYSIS_COLUMNS`].
///
/// The schema is checked before any row is looked at, so a table missing a
/// required column fails even when it has no rows. Rows whose date cell is
/// not an ISO calendar date never match.
pub fn select(table: &Table, selection: &Selection) -> Result<FilteredTable, SchemaError> {
    let projected = table.project(&ANALYSIS_COLUMNS)?;
    // Positions of location/date inside the projection.
    let (loc_idx, date_idx) = (0, 1);

    let mut unparsed_dates = 0usize;
    let selected = projected.filter_rows(|row| {
        let Some(location) = row[loc_idx].as_str() else {
            return false;
        };
        if location != selection.location {
            return false;
        }
        match parse_date(&row[date_idx]) {
            Some(date) => selection.contains(location, date),
            None => {
                unparsed_dates += 1;
                false
            }
        }
    });

    if unparsed_dates > 0 {
        log::warn!(
            "Skipped {unparsed_dates} '{}' rows without a YYYY-MM-DD date",
            selection.location
        );
    }
    log::debug!(
        "Selected {} of {} rows for {} between {} and {}",
        selected.len(),
        table.len(),
        selection.location,
        selection.start,
        selection.end
    );

    Ok(FilteredTable { table: selected })
}
