/// Data layer: core types, loading, derivation, filtering, and export.
///
/// Architecture:
/// ```text
///   loan CSV
///       │
///       ▼
///  ┌──────────┐
///  │  loader   │  parse file, derive columns → ApplicantTable
///  └──────────┘
///       │
///       ▼
///  ┌───────────────┐
///  │ ApplicantTable │  Vec<Applicant>, domains, ranges
///  └───────────────┘
///       │
///       ▼
///  ┌──────────┐     ┌──────────┐
///  │  filter   │ ──▶ │ summary  │  pipeline::build_view → DashboardView
///  └──────────┘     └──────────┘
///       │
///       ▼
///  ┌──────────┐
///  │  export   │  filtered view → filtered_data.csv
///  └──────────┘
/// ```

pub mod derive;
pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
pub mod summary;
