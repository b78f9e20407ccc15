// Asset Listing - Core Library
// Filter → search → sort → paginate over in-memory financial-asset records.
// Used by the CLI/TUI binary and by the integration tests.

pub mod parser;         // Typed value parsing (currency, percentage, listing dates)
pub mod entities;       // Property / fund / transaction records + Listable capability
pub mod filter;         // Category filter predicate
pub mod search;         // Case-insensitive substring search
pub mod sorting;        // Named sort strategies
pub mod pagination;     // Fixed-size pages
pub mod config;         // Per-dataset configuration + presets
pub mod listing;        // Listing controller (the pipeline)
pub mod debounce;       // Search keystroke debouncing
pub mod data_quality;   // Audit of parse fallbacks
pub mod fixtures;       // JSON / CSV dataset loading

// Re-export commonly used types
pub use parser::{
    parse_currency, parse_date, parse_percentage,
    try_parse_currency, try_parse_date, try_parse_percentage,
    ValueKind,
};
pub use entities::{
    Listable, ListableRecord, TextField, NumericField,
    PropertyRecord, FundRecord, TransactionRecord,
};
pub use filter::{FilterOption, FilterPredicate, FilterSelection};
pub use search::SearchMatcher;
pub use sorting::{Direction, SortCriterion, SortRegistry, SortStrategy};
pub use pagination::{paginate, Page};
pub use config::DatasetConfig;
pub use listing::{query, Criteria, ListingController, ViewMode, VisibleSlice};
pub use debounce::SearchDebouncer;
pub use data_quality::{
    BatchSummary, DataQualityEngine, QualityIssue, QualityReport, Severity,
};
pub use fixtures::{load_csv, load_json, DatasetKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
