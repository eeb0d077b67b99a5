/// Data layer: core types, parsing, loading, and group selection.
///
/// Architecture:
/// ```text
///  .csv / .txt / .json / pasted text
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read file → raw header + cells
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  parser   │────▶│  schema   │  numeric vs categorical, per column
///   └──────────┘     └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  ordered columns, rows of Number | Text
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  split an outcome column by group → NumericVectors
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
pub mod schema;
