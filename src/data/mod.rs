/// Data layer: core types, loading, cleaning, filtering and aggregation.
///
/// Architecture:
/// ```text
///   metadata.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → raw Table (row-limited)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  clean   │  drop untitled / undated rows, derive year + word count
///   └──────────┘
///        │
///        ├──────────────► writer   (cleaned_metadata.csv)
///        ▼
///   ┌──────────┐
///   │  filter  │  year window → record indices
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  years, top journals, title words, sources
///   └───────────┘
/// ```
pub mod aggregate;
pub mod clean;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
