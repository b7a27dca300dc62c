/// Data layer: transaction types, loading, classification, filtering and
/// aggregation.
///
/// Architecture:
/// ```text
///  Transactions.csv (path or upload bytes)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + normalise rows → Vec<Transaction>
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ infer / classify  │  company table (static or inferred) → labels
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ TransactionTable  │  immutable records + label indices
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐     ┌───────────┐
///   │  filter   │ ──▶ │ aggregate  │  chart-ready sums
///   └──────────┘     └───────────┘
/// ```

pub mod aggregate;
pub mod classify;
pub mod error;
pub mod filter;
pub mod infer;
pub mod loader;
pub mod model;
