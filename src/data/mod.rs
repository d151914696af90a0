/// Data layer: core types, loading, querying, and statistics.
///
/// Architecture:
/// ```text
///  .xlsx / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  cell grid + SheetLayout → RecordStore
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ RecordStore   │  ordered Vec<Entry>, immutable snapshot
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌──────────┐
///   │  query    │ ───▶ │  stats    │  filter/union/pluck → mean, mode, …
///   └──────────┘      └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod query;
pub mod stats;
