//! Data layer: core types, loading, selection and decimation.
//!
//! Architecture:
//! ```text
//!  .csv / .parquet / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Table (normalised column names)
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter   │  location + date range, project → FilteredTable
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ decimate  │  positions 0..N, keep every stride-th → DecimatedTable
//!   └──────────┘
//! ```

pub mod decimate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
