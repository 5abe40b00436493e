/// Data layer: core types, loading, filtering and reshaping.
///
/// Architecture:
/// ```text
///  .csv / .tsv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ExpressionDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────────┐
///   │ ExpressionDataset │  Vec<GeneRow>, condition names, gene index
///   └───────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  selected genes → matching rows
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  reshape  │  rows × conditions → long rows / heatmap matrix
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod reshape;
