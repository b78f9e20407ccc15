// 🏷️ Filter Predicate - category chips as data
// Filter labels are what the user clicks; categories are what records store.
// The label → category table is per-dataset configuration, never inferred.

use crate::entities::Listable;
use serde::{Deserialize, Serialize};

// ============================================================================
// FILTER OPTION
// ============================================================================

/// One selectable filter chip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    /// What the user sees (e.g., "Redemption Fund")
    pub label: String,

    /// Stored category it selects (e.g., "Redemption")
    pub category: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, category: impl Into<String>) -> Self {
        FilterOption {
            label: label.into(),
            category: category.into(),
        }
    }

    /// Label and category spelled the same
    pub fn same(name: impl Into<String>) -> Self {
        let name = name.into();
        FilterOption {
            label: name.clone(),
            category: name,
        }
    }
}

/// What an active filter label resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterSelection<'a> {
    /// The wildcard label: every record passes
    All,
    Category(&'a str),
    /// Not in the table: nothing passes
    Unknown,
}

// ============================================================================
// FILTER PREDICATE
// ============================================================================

/// Borrowed view over a dataset's wildcard label and filter table
#[derive(Debug, Clone, Copy)]
pub struct FilterPredicate<'a> {
    wildcard_label: &'a str,
    options: &'a [FilterOption],
}

impl<'a> FilterPredicate<'a> {
    pub fn new(wildcard_label: &'a str, options: &'a [FilterOption]) -> Self {
        FilterPredicate {
            wildcard_label,
            options,
        }
    }

    pub fn resolve(&self, active_filter: &str) -> FilterSelection<'a> {
        if active_filter == self.wildcard_label {
            return FilterSelection::All;
        }

        match self.options.iter().find(|opt| opt.label == active_filter) {
            Some(opt) => FilterSelection::Category(opt.category.as_str()),
            None => FilterSelection::Unknown,
        }
    }

    /// Does `record` belong under `active_filter`?
    pub fn matches<R: Listable + ?Sized>(&self, record: &R, active_filter: &str) -> bool {
        Self::selection_matches(self.resolve(active_filter), record)
    }

    fn selection_matches<R: Listable + ?Sized>(selection: FilterSelection<'_>, record: &R) -> bool {
        match selection {
            FilterSelection::All => true,
            FilterSelection::Category(category) => record.category() == category,
            FilterSelection::Unknown => false,
        }
    }

    /// Keep the records under `active_filter`, preserving input order
    pub fn apply<'r, R, I>(&self, records: I, active_filter: &str) -> Vec<&'r R>
    where
        R: Listable + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        let selection = self.resolve(active_filter);
        if selection == FilterSelection::Unknown {
            tracing::debug!(filter = %active_filter, "unknown filter label matches no records");
        }

        records
            .into_iter()
            .filter(|record| Self::selection_matches(selection, *record))
            .collect()
    }

    /// Wildcard first, then the configured labels in order
    pub fn labels(&self) -> Vec<&'a str> {
        std::iter::once(self.wildcard_label)
            .chain(self.options.iter().map(|opt| opt.label.as_str()))
            .collect()
    }

    /// Configured label that selects `category`, if any
    pub fn label_for_category(&self, category: &str) -> Option<&'a str> {
        self.options
            .iter()
            .find(|opt| opt.category == category)
            .map(|opt| opt.label.as_str())
    }
}

// ============================================================================
// TESTS
// ============================================================================
