/// Data layer: core types, loading, filtering, and serialization.
///
/// Architecture:
/// ```text
///      raw .csv
///         │
///         ▼
///    ┌──────────┐
///    │  loader   │  parse file → Table
///    └──────────┘
///         │
///         ▼
///    ┌──────────┐
///    │  Table    │  Vec<rows>, column index
///    └──────────┘
///         │
///         ▼
///    ┌──────────┐
///    │  filter   │  range predicates → retained indices
///    └──────────┘
///         │
///         ▼
///    ┌──────────┐
///    │  writer   │  Table → clean .csv
///    └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod writer;
