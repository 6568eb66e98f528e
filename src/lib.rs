//! Cleaning, aggregation and charting for publication metadata exports
//! (CORD-19 `metadata.csv` layout), shared by the `analyze` batch binary
//! and the `cord-explorer` dashboard.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod pipeline;
pub mod report;
pub mod state;
