//! Plain-text output for the command line.

use crate::data::decimate::DecimatedTable;
use crate::pipeline::StageCounts;

/// Row and column counts of the selected table.
pub fn summary(counts: &StageCounts) -> String {
    format!(
        "Rows: {}\nColumns: {}\nPlotted rows: {} of {} loaded\n",
        counts.selected_rows, counts.selected_columns, counts.decimated_rows, counts.source_rows
    )
}

/// The decimated rows as an aligned text table, position first.
pub fn render_rows(decimated: &DecimatedTable) -> String {
    let mut header = vec!["position".to_string()];
    header.extend(decimated.table().columns().iter().cloned());

    let rows: Vec<Vec<String>> = decimated
        .iter()
        .map(|(pos, cells)| {
            std::iter::once(pos.to_string())
                .chain(cells.iter().map(ToString::to_string))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|i| {
            rows.iter()
                .map(|r| r[i].len())
                .chain(std::iter::once(header[i].len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in std::iter::once(&header).chain(rows.iter()) {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, &w)| format!("{cell:>w$}"))
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::decimate::{decimate, reindex, DEFAULT_STRIDE};
    use crate::data::filter::{select, Selection, ANALYSIS_COLUMNS};
    use crate::data::model::{CellValue, Table};

    fn decimated(days: u32) -> DecimatedTable {
        let columns = ANALYSIS_COLUMNS.iter().map(|c| c.to_string()).collect();
        let rows = (1..=days)
            .map(|day| {
                let mut row = vec![
                    CellValue::Text("Ecuador".into()),
                    CellValue::Text(format!("2020-05-{day:02}")),
                ];
                row.extend((0..6).map(|_| CellValue::Number(day as f64)));
                row
            })
            .collect();
        let table = Table::from_rows(columns, rows).unwrap();
        decimate(reindex(select(&table, &Selection::default()).unwrap()), DEFAULT_STRIDE)
    }

    #[test]
    fn summary_lists_counts() {
        let counts = StageCounts {
            source_rows: 1000,
            selected_rows: 153,
            selected_columns: 8,
            decimated_rows: 16,
        };
        assert_eq!(
            summary(&counts),
            "Rows: 153\nColumns: 8\nPlotted rows: 16 of 1000 loaded\n"
        );
    }

    #[test]
    fn rows_are_aligned_with_positions() {
        let text = render_rows(&decimated(21));
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].trim_start().starts_with("position  location        date"));
        assert!(lines[2].contains("10   Ecuador  2020-05-11"));
        assert!(lines[3].trim_start().starts_with("20"));
    }

    #[test]
    fn empty_table_prints_header_only() {
        let text = render_rows(&decimated(0));
        assert_eq!(text.lines().count(), 1);
    }
}
