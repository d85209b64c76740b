//! Country-level COVID-19 charts from Our World in Data exports.
//!
//! The pipeline is `data::loader` → `data::filter` → `data::decimate` →
//! `chart`, composed by [`pipeline::run`]; `app` and `ui` display the result.

pub mod app;
pub mod chart;
pub mod cli;
pub mod color;
pub mod config;
pub mod data;
pub mod export;
pub mod pipeline;
pub mod report;
pub mod state;
pub mod ui;
