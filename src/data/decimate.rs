use std::num::NonZeroUsize;

use super::error::SchemaError;
use super::filter::{FilteredTable, DATE_COLUMN};
use super::model::{CellValue, Table};

/// Keep one row in ten.
pub const DEFAULT_STRIDE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => panic!("stride must be non-zero"),
};

// ---------------------------------------------------------------------------
// Reindexing
// ---------------------------------------------------------------------------

/// A filtered table whose rows carry dense positions `0..N` in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexedTable {
    table: Table,
    positions: Vec<usize>,
}

impl IndexedTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

/// Assign each row its zero-based position, discarding any earlier index.
pub fn reindex(filtered: FilteredTable) -> IndexedTable {
    let table = filtered.into_table();
    let positions = (0..table.len()).collect();
    IndexedTable { table, positions }
}

// ---------------------------------------------------------------------------
// Decimation
// ---------------------------------------------------------------------------

/// Every `stride`-th row of an [`IndexedTable`]. Surviving rows keep their
/// original positions (0, 10, 20, ... for a stride of 10).
#[derive(Debug, Clone, PartialEq)]
pub struct DecimatedTable {
    table: Table,
    positions: Vec<usize>,
    stride: NonZeroUsize,
}

impl DecimatedTable {
    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    pub fn stride(&self) -> NonZeroUsize {
        self.stride
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Row dates as they appear in the table.
    pub fn dates(&self) -> Result<Vec<String>, SchemaError> {
        self.table.text_column(DATE_COLUMN)
    }

    /// One metric column; missing reports are `None`.
    pub fn series(&self, column: &str) -> Result<Vec<Option<f64>>, SchemaError> {
        self.table.numeric_column(column)
    }

    /// Rows paired with their positions.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &[CellValue])> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.table.rows().iter().map(Vec::as_slice))
    }
}

/// Keep rows whose position is a multiple of `stride`. Yields `ceil(N / stride)`
/// rows; an empty input gives an empty result.
pub fn decimate(indexed: IndexedTable, stride: NonZeroUsize) -> DecimatedTable {
    let IndexedTable { table, positions } = indexed;
    let step = stride.get();

    let mut rows_seen = 0;
    let kept = table.filter_rows(|_| {
        let keep = positions[rows_seen] % step == 0;
        rows_seen += 1;
        keep
    });
    let kept_positions: Vec<usize> = positions.iter().copied().filter(|p| p % step == 0).collect();

    log::debug!(
        "Decimated {} rows to {} with stride {step}",
        positions.len(),
        kept.len()
    );

    DecimatedTable {
        table: kept,
        positions: kept_positions,
        stride,
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};

    use super::*;
    use crate::data::filter::{select, Selection, ANALYSIS_COLUMNS};

    fn ecuador_days(start: NaiveDate, n: u64) -> Table {
        let columns = ANALYSIS_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = (0..n)
            .map(|i| {
                let date = start + Days::new(i);
                let mut row = vec![
                    CellValue::Text("Ecuador".into()),
                    CellValue::Text(date.format("%Y-%m-%d").to_string()),
                ];
                row.extend((0..6).map(|_| CellValue::Number(i as f64)));
                row
            })
            .collect();
        Table::from_rows(columns, rows).unwrap()
    }

    fn filtered(n: u64) -> FilteredTable {
        let start = NaiveDate::from_ymd_opt(2020, 4, 1).unwrap();
        select(&ecuador_days(start, n), &Selection::default()).unwrap()
    }

    #[test]
    fn positions_are_dense_and_ordered() {
        let indexed = reindex(filtered(25));
        assert_eq!(indexed.positions(), (0..25).collect::<Vec<_>>());
        for pair in indexed.positions().windows(2) {
            assert_eq!(pair[1], pair[0] + 1);
        }
    }

    #[test]
    fn keeps_ceil_n_over_stride_rows() {
        for n in [0u64, 1, 9, 10, 11, 20, 21, 153] {
            let decimated = decimate(reindex(filtered(n)), DEFAULT_STRIDE);
            assert_eq!(decimated.len(), (n as usize).div_ceil(10), "n = {n}");
        }
    }

    #[test]
    fn five_months_of_ecuador() {
        let filtered = filtered(153);
        assert_eq!(filtered.len(), 153);
        assert_eq!(filtered.table().columns().len(), 8);

        let decimated = decimate(reindex(filtered), DEFAULT_STRIDE);
        assert_eq!(decimated.len(), 16);
        assert_eq!(
            decimated.positions(),
            (0..=150).step_by(10).collect::<Vec<_>>()
        );
        let dates = decimated.dates().unwrap();
        assert_eq!(dates.first().map(String::as_str), Some("2020-04-01"));
        assert_eq!(dates.last().map(String::as_str), Some("2020-08-29"));
        assert_eq!(decimated.series("new_cases").unwrap()[1], Some(10.0));
    }

    #[test]
    fn empty_input_is_not_an_error() {
        let decimated = decimate(reindex(filtered(0)), DEFAULT_STRIDE);
        assert!(decimated.is_empty());
        assert!(decimated.positions().is_empty());
        assert!(decimated.dates().unwrap().is_empty());
    }

    #[test]
    fn other_strides() {
        let three = NonZeroUsize::new(3).unwrap();
        let decimated = decimate(reindex(filtered(10)), three);
        assert_eq!(decimated.positions(), [0, 3, 6, 9]);
        assert_eq!(decimated.stride(), three);

        let decimated = decimate(reindex(filtered(4)), NonZeroUsize::MIN);
        assert_eq!(decimated.positions(), [0, 1, 2, 3]);
    }

    #[test]
    fn iter_pairs_positions_with_rows() {
        let decimated = decimate(reindex(filtered(21)), DEFAULT_STRIDE);
        let pairs: Vec<_> = decimated.iter().map(|(p, row)| (p, row[3].as_f64())).collect();
        assert_eq!(pairs, [(0, Some(0.0)), (10, Some(10.0)), (20, Some(20.0))]);
    }
}
