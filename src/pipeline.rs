use std::num::NonZeroUsize;

use crate::data::decimate::{decimate, reindex, DecimatedTable};
use crate::data::error::SchemaError;
use crate::data::filter::{select, Selection};
use crate::data::model::Table;

/// Row and column counts of each stage, for the run summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageCounts {
    pub source_rows: usize,
    pub selected_rows: usize,
    pub selected_columns: usize,
    pub decimated_rows: usize,
}

/// Selector → reindexer → decimator over an already loaded table.
pub fn run(
    table: &Table,
    selection: &Selection,
    stride: NonZeroUsize,
) -> Result<(DecimatedTable, StageCounts), SchemaError> {
    let filtered = select(table, selection)?;
    let selected_rows = filtered.len();
    let selected_columns = filtered.table().columns().len();
    log::info!(
        "Selected {selected_rows} rows x {selected_columns} columns for {}",
        selection.location
    );
    if filtered.is_empty() {
        log::warn!(
            "No rows for {} between {} and {}",
            selection.location,
            selection.start,
            selection.end
        );
    }

    let decimated = decimate(reindex(filtered), stride);
    log::info!("Kept {} rows at stride {stride}", decimated.len());

    let counts = StageCounts {
        source_rows: table.len(),
        selected_rows,
        selected_columns,
        decimated_rows: decimated.len(),
    };
    Ok((decimated, counts))
}
