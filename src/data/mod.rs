/// Data layer: core types, loading, and row selection.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Observation>, immutable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  rows by date / by region, SortKey ordering
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
