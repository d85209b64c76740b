use std::fmt;

use super::error::{SchemaError, ShapeError};

// ---------------------------------------------------------------------------
// CellValue – a single cell of a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell. Missing reports are `Null`.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, ""),
        }
    }
}

impl CellValue {
    /// Guess the type of a raw text cell the way a CSV reader would.
    /// Whitespace around numbers and booleans is ignored; text cells keep
    /// the raw string so equality on them stays exact.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if s.is_empty() {
            return CellValue::Null;
        }
        // Only try numeric parsing on things that look numeric, so that text
        // like "nan" or "inf" stays text.
        let numeric_start = s
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_digit() || matches!(c, '-' | '+' | '.'));
        if numeric_start {
            if let Ok(v) = s.parse::<f64>() {
                return CellValue::Number(v);
            }
        }
        match s {
            "true" | "True" => CellValue::Bool(true),
            "false" | "False" => CellValue::Bool(false),
            _ => CellValue::Text(raw.to_string()),
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – rows sharing one column schema
// ---------------------------------------------------------------------------

/// An in-memory table. Every row has exactly `columns.len()` cells, so all
/// rows share the same column set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table from rows, checking every row against the header width.
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<CellValue>>,
    ) -> Result<Self, (usize, ShapeError)> {
        let mut table = Table::new(columns);
        for (i, row) in rows.into_iter().enumerate() {
            table.push_row(row).map_err(|e| (i, e))?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<CellValue>) -> Result<(), ShapeError> {
        if row.len() != self.columns.len() {
            return Err(ShapeError {
                expected: self.columns.len(),
                found: row.len(),
            });
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Resolve several column names at once, reporting every missing one.
    pub fn require_columns(&self, names: &[&str]) -> Result<Vec<usize>, SchemaError> {
        let mut indices = Vec::with_capacity(names.len());
        let mut missing = Vec::new();
        for name in names {
            match self.column_index(name) {
                Some(idx) => indices.push(idx),
                None => missing.push((*name).to_string()),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(SchemaError::MissingColumns { columns: missing })
        }
    }

    /// Restrict the table to `names`, in that order.
    pub fn project(&self, names: &[&str]) -> Result<Table, SchemaError> {
        let indices = self.require_columns(names)?;
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();
        Ok(Table {
            columns: names.iter().map(|n| (*n).to_string()).collect(),
            rows,
        })
    }

    /// Stable row filter; keeps the schema.
    pub fn filter_rows<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(&[CellValue]) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| keep(r)).cloned().collect(),
        }
    }

    /// Numeric view of one column; non-numeric cells become `None`.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<Option<f64>>, SchemaError> {
        let idx = self.require_columns(&[name])?[0];
        Ok(self.rows.iter().map(|row| row[idx].as_f64()).collect())
    }

    /// Text view of one column, with every cell rendered through `Display`.
    pub fn text_column(&self, name: &str) -> Result<Vec<String>, SchemaError> {
        let idx = self.require_columns(&[name])?[0];
        Ok(self.rows.iter().map(|row| row[idx].to_string()).collect())
    }
}
