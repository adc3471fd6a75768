/// Data layer: embedded table, normalisation, filtering and projection.
///
/// Architecture:
/// ```text
///   embedded GVA table
///        │
///        ▼
///   ┌──────────┐
///   │  source   │  raw cells, year labels with R/P markers
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ DatasetSnapshot   │  validated, ordered, immutable
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  categories × years → CategoryRecord list
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ projection  │  table / single-year bars / multi-year series
///   └────────────┘
/// ```

pub mod filter;
pub mod model;
pub mod projection;
pub mod source;
