// 🔍 Search Matcher - case-insensitive substring over searchable fields
// Plain `contains`, no tokenizing or fuzzy matching.

use crate::entities::{Listable, TextField};

/// Borrowed view over a dataset's searchable fields
#[derive(Debug, Clone, Copy)]
pub struct SearchMatcher<'a> {
    fields: &'a [TextField],
}

impl<'a> SearchMatcher<'a> {
    pub fn new(fields: &'a [TextField]) -> Self {
        SearchMatcher { fields }
    }

    /// Empty or whitespace-only queries match every record
    pub fn matches<R: Listable + ?Sized>(&self, record: &R, query: &str) -> bool {
        match normalize_query(query) {
            None => true,
            Some(needle) => self.matches_normalized(record, &needle),
        }
    }

    fn matches_normalized<R: Listable + ?Sized>(&self, record: &R, needle: &str) -> bool {
        record
            .searchable_fields(self.fields)
            .iter()
            .any(|value| value.to_lowercase().contains(needle))
    }

    /// Keep matching records, preserving input order
    pub fn apply<'r, R, I>(&self, records: I, query: &str) -> Vec<&'r R>
    where
        R: Listable + 'r,
        I: IntoIterator<Item = &'r R>,
    {
        match normalize_query(query) {
            None => records.into_iter().collect(),
            Some(needle) => records
                .into_iter()
                .filter(|record| self.matches_normalized(*record, &needle))
                .collect(),
        }
    }
}

/// Lowercased query, or `None` when it is blank.
///
/// Only blankness is judged on the trimmed text; the needle itself keeps
/// inner and outer spaces so "oak st" stays a phrase.
pub fn normalize_query(query: &str) -> Option<String> {
    if query.trim().is_empty() {
        None
    } else {
        Some(query.to_lowercase())
    }
}
