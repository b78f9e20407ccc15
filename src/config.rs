// ⚙️ Dataset Configuration - per-listing knobs as data
// Wildcard label, filter table, searchable fields, sort strategies and page
// size. Built-in presets cover the three listings; JSON files can replace them.

use crate::entities::{NumericField, TextField};
use crate::filter::{FilterOption, FilterPredicate};
use crate::search::SearchMatcher;
use crate::sorting::{Direction, SortCriterion, SortRegistry, SortStrategy};
use anyhow::{bail, ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

pub const DEFAULT_WILDCARD_LABEL: &str = "All";
pub const DEFAULT_PAGE_SIZE: usize = 9;

fn default_wildcard_label() -> String {
    DEFAULT_WILDCARD_LABEL.to_string()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

// ============================================================================
// DATASET CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Display name of the listing (e.g., "Investment Funds")
    pub name: String,

    #[serde(default = "default_wildcard_label")]
    pub wildcard_label: String,

    /// Filter chips in display order
    #[serde(default)]
    pub filters: Vec<FilterOption>,

    pub searchable_fields: Vec<TextField>,

    pub sort_strategies: Vec<SortStrategy>,

    /// Sort label a fresh listing starts with
    pub default_sort: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl DatasetConfig {
    /// Load and validate a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read dataset config: {:?}", path.as_ref()))?;

        Self::from_json_str(&content)
            .with_context(|| format!("Invalid dataset config: {:?}", path.as_ref()))
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: DatasetConfig =
            serde_json::from_str(content).context("Failed to parse dataset config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configs the pipeline cannot serve sensibly
    pub fn validate(&self) -> Result<()> {
        ensure!(self.page_size >= 1, "page_size must be at least 1");
        ensure!(
            !self.wildcard_label.trim().is_empty(),
            "wildcard_label must not be blank"
        );

        let mut labels = HashSet::new();
        for option in &self.filters {
            if option.label == self.wildcard_label {
                bail!("filter label {:?} shadows the wildcard", option.label);
            }
            if !labels.insert(option.label.as_str()) {
                bail!("duplicate filter label {:?}", option.label);
            }
        }

        let mut sorts = HashSet::new();
        for strategy in &self.sort_strategies {
            if !sorts.insert(strategy.label.as_str()) {
                bail!("duplicate sort label {:?}", strategy.label);
            }
        }

        ensure!(
            sorts.contains(self.default_sort.as_str()),
            "default_sort {:?} is not one of the sort strategies",
            self.default_sort
        );

        Ok(())
    }

    /// Builder pattern: override page size
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn filter_predicate(&self) -> FilterPredicate<'_> {
        FilterPredicate::new(&self.wildcard_label, &self.filters)
    }

    pub fn search_matcher(&self) -> SearchMatcher<'_> {
        SearchMatcher::new(&self.searchable_fields)
    }

    pub fn sort_registry(&self) -> SortRegistry<'_> {
        SortRegistry::new(&self.sort_strategies)
    }

    // ========================================================================
    // PRESETS
    // ========================================================================

    /// Tax-deed property listing
    pub fn properties() -> Self {
        DatasetConfig {
            name: "Tax Deed Properties".to_string(),
            wildcard_label: default_wildcard_label(),
            filters: vec![
                FilterOption::new("Upcoming Auctions", "Auction"),
                FilterOption::new("In Redemption", "Redemption"),
                FilterOption::same("Sold"),
            ],
            searchable_fields: vec![TextField::Name, TextField::Location, TextField::Description],
            sort_strategies: with_date_sorts(vec![
                SortStrategy::new(
                    "Price (High to Low)",
                    SortCriterion::Numeric(NumericField::Amount),
                    Direction::Desc,
                ),
                SortStrategy::new(
                    "Price (Low to High)",
                    SortCriterion::Numeric(NumericField::Amount),
                    Direction::Asc,
                ),
                SortStrategy::new(
                    "Highest Rate",
                    SortCriterion::Numeric(NumericField::Rate),
                    Direction::Desc,
                ),
                SortStrategy::new(
                    "Lowest Rate",
                    SortCriterion::Numeric(NumericField::Rate),
                    Direction::Asc,
                ),
            ]),
            default_sort: "Newest".to_string(),
            page_size: 9,
        }
    }

    /// Investment fund listing
    pub fn funds() -> Self {
        DatasetConfig {
            name: "Investment Funds".to_string(),
            wildcard_label: default_wildcard_label(),
            filters: vec![
                FilterOption::new("Redemption Fund", "Redemption"),
                FilterOption::new("Acquisition Fund", "Acquisition"),
                FilterOption::new("Income Fund", "Income"),
            ],
            searchable_fields: vec![TextField::Name, TextField::Location, TextField::Description],
            sort_strategies: with_date_sorts(vec![
                SortStrategy::new(
                    "Highest IRR",
                    SortCriterion::Numeric(NumericField::Rate),
                    Direction::Desc,
                ),
                SortStrategy::new(
                    "Lowest IRR",
                    SortCriterion::Numeric(NumericField::Rate),
                    Direction::Asc,
                ),
                SortStrategy::new(
                    "Fund Size (High to Low)",
                    SortCriterion::Numeric(NumericField::Amount),
                    Direction::Desc,
                ),
                SortStrategy::new(
                    "Fund Size (Low to High)",
                    SortCriterion::Numeric(NumericField::Amount),
                    Direction::Asc,
                ),
                SortStrategy::new(
                    "Most Committed",
                    SortCriterion::Numeric(NumericField::CapacityUsed),
                    Direction::Desc,
                ),
                SortStrategy::new("Name (A-Z)", SortCriterion::Text(TextField::Name), Direction::Asc),
            ]),
            default_sort: "Highest IRR".to_string(),
            page_size: 6,
        }
    }

    /// Account transaction listing
    pub fn transactions() -> Self {
        DatasetConfig {
            name: "Transactions".to_string(),
            wildcard_label: default_wildcard_label(),
            filters: vec![
                FilterOption::new("Deposits", "Deposit"),
                FilterOption::new("Withdrawals", "Withdrawal"),
                FilterOption::new("Distributions", "Distribution"),
                FilterOption::new("Fees", "Fee"),
            ],
            searchable_fields: vec![
                TextField::Name,
                TextField::Location,
                TextField::Description,
                TextField::Id,
            ],
            sort_strategies: with_date_sorts(vec![
                SortStrategy::new(
                    "Amount (High to Low)",
                    SortCriterion::Numeric(NumericField::Amount),
                    Direction::Desc,
                ),
                SortStrategy::new(
                    "Amount (Low to High)",
                    SortCriterion::Numeric(NumericField::Amount),
                    Direction::Asc,
                ),
            ]),
            default_sort: "Newest".to_string(),
            page_size: 10,
        }
    }
}

/// "Newest" and "Oldest" lead every preset's sort menu
fn with_date_sorts(rest: Vec<SortStrategy>) -> Vec<SortStrategy> {
    let mut strategies = vec![
        SortStrategy::new("Newest", SortCriterion::Date, Direction::Desc),
        SortStrategy::new("Oldest", SortCriterion::Date, Direction::Asc),
    ];
    strategies.extend(rest);
    strategies
}

// ============================================================================
// TESTS
// ============================================================================
