/// Data layer: core types, loading, filtering, aggregation, and export.
///
/// Architecture:
/// ```text
///  .xlsx / .csv / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader  │  parse file → TransactionTable (or empty + SourceUnavailable)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter  │  expense types, then date range → filtered TransactionTable
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │ summary  │   │  export  │  filtered view → .xlsx / .csv
///   └──────────┘   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
