use std::num::NonZeroUsize;
use std::path::PathBuf;

use chrono::NaiveDate;

use crate::chart::ChartSet;
use crate::config::RunConfig;
use crate::data::decimate::DecimatedTable;
use crate::data::error::SchemaError;
use crate::data::model::Table;
use crate::pipeline::{self, StageCounts};

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartView {
    #[default]
    Trend,
    Comparison,
}

/// Side-panel edits that have not been applied yet.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionDraft {
    pub location: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub stride: usize,
}

impl From<&RunConfig> for SelectionDraft {
    fn from(config: &RunConfig) -> Self {
        SelectionDraft {
            location: config.selection.location.clone(),
            start: config.selection.start,
            end: config.selection.end,
            stride: config.stride.get(),
        }
    }
}

/// Everything derived from one table under one config.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub decimated: DecimatedTable,
    pub counts: StageCounts,
    pub charts: ChartSet,
}

impl RunOutput {
    pub fn compute(table: &Table, config: &RunConfig) -> Result<Self, SchemaError> {
        let (decimated, counts) = pipeline::run(table, &config.selection, config.stride)?;
        let charts = ChartSet::build(&decimated, config)?;
        Ok(RunOutput {
            decimated,
            counts,
            charts,
        })
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Applied configuration.
    pub config: RunConfig,

    pub draft: SelectionDraft,

    /// Source file and its table (None until a file is loaded).
    pub source: Option<(PathBuf, Table)>,

    /// Latest pipeline result for `source` under `config`.
    pub output: Option<RunOutput>,

    pub view: ChartView,

    /// Whether the decimated-rows window is open.
    pub show_table: bool,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Where the next screenshot is written.
    pub pending_screenshot: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: RunConfig) -> Self {
        Self {
            draft: SelectionDraft::from(&config),
            config,
            source: None,
            output: None,
            view: ChartView::default(),
            show_table: false,
            status_message: None,
            pending_screenshot: None,
        }
    }

    /// State for a table loaded at startup. A schema problem here is fatal,
    /// so it is returned instead of shown in the status line.
    pub fn with_source(config: RunConfig, path: PathBuf, table: Table) -> Result<Self, SchemaError> {
        let output = RunOutput::compute(&table, &config)?;
        let mut state = AppState::new(config);
        state.source = Some((path, table));
        state.output = Some(output);
        Ok(state)
    }

    /// Ingest a newly opened table and recompute the charts.
    pub fn set_source(&mut self, path: PathBuf, table: Table) {
        self.source = Some((path, table));
        self.refresh();
    }

    /// Re-run the pipeline on the current table.
    pub fn refresh(&mut self) {
        let Some((path, table)) = &self.source else {
            self.output = None;
            return;
        };
        match RunOutput::compute(table, &self.config) {
            Ok(output) => {
                self.output = Some(output);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Cannot chart {}: {e}", path.display());
                self.status_message = Some(format!("Error: {e}"));
                self.output = None;
            }
        }
    }

    /// Validate the side-panel edits and, if they are valid, apply them.
    pub fn apply_draft(&mut self) {
        let mut candidate = self.config.clone();
        candidate.selection.location = self.draft.location.trim().to_string();
        candidate.selection.start = self.draft.start;
        candidate.selection.end = self.draft.end;
        match NonZeroUsize::new(self.draft.stride) {
            Some(stride) => candidate.stride = stride,
            None => {
                self.status_message = Some("Error: stride must be at least 1".into());
                return;
            }
        }
        if let Err(e) = candidate.validate() {
            log::warn!("Rejected selection: {e}");
            self.status_message = Some(format!("Error: {e}"));
            return;
        }
        self.config = candidate;
        self.refresh();
    }

    /// Throw away side-panel edits.
    pub fn reset_draft(&mut self) {
        self.draft = SelectionDraft::from(&self.config);
    }
}
