/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → BaseTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ BaseTable  │  Vec<Record>, immutable
///   └───────────┘
///        │  DateRange
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive date predicate → FilteredTable
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  group-by sums → DerivedViews (or Empty)
///   └───────────┘
/// ```

pub mod aggregate;
pub mod filter;
pub mod labels;
pub mod loader;
pub mod model;
