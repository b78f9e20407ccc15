// 📋 Listing Controller - filter → search → sort → paginate
//
// A controller borrows a read-only dataset and its config, owns the current
// `Criteria`, and keeps the matched+sorted sequence so that page changes only
// re-slice. Every mutation recomputes synchronously before returning.

use crate::config::DatasetConfig;
use crate::entities::Listable;
use crate::pagination::{self, Page};
use serde::{Deserialize, Serialize};

// ============================================================================
// VIEW MODE & CRITERIA
// ============================================================================

/// Rendering only: never changes membership or order of the visible slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    pub fn toggle(self) -> Self {
        match self {
            ViewMode::Grid => ViewMode::List,
            ViewMode::List => ViewMode::Grid,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }
}

/// User-selected listing parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Criteria {
    pub active_filter: String,
    pub search_query: String,
    pub sort_key: String,
    /// 1-based
    pub current_page: usize,
    pub view_mode: ViewMode,
}

impl Criteria {
    /// Wildcard filter, no query, the config's default sort, page 1
    pub fn for_config(config: &DatasetConfig) -> Self {
        Criteria {
            active_filter: config.wildcard_label.clone(),
            search_query: String::new(),
            sort_key: config.default_sort.clone(),
            current_page: 1,
            view_mode: ViewMode::default(),
        }
    }

    pub fn with_filter(mut self, label: impl Into<String>) -> Self {
        self.active_filter = label.into();
        self
    }

    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    pub fn with_sort(mut self, sort_key: impl Into<String>) -> Self {
        self.sort_key = sort_key.into();
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.current_page = page;
        self
    }

    pub fn with_view_mode(mut self, view_mode: ViewMode) -> Self {
        self.view_mode = view_mode;
        self
    }

    /// True when filter, query or sort differ, i.e. the result set changes
    pub fn changes_result_set(&self, other: &Criteria) -> bool {
        self.active_filter != other.active_filter
            || self.search_query != other.search_query
            || self.sort_key != other.sort_key
    }
}

// ============================================================================
// VISIBLE SLICE
// ============================================================================

/// Derived view of one page; borrows the dataset, owns nothing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisibleSlice<'a, R> {
    pub visible_records: Vec<&'a R>,

    /// Count after filter + search, before pagination
    pub total_matching: usize,

    pub total_pages: usize,

    /// Page served, after clamping
    pub current_page: usize,

    /// Index of the first visible record within the matched sequence
    pub offset: usize,

    pub view_mode: ViewMode,
}

impl<'a, R> VisibleSlice<'a, R> {
    fn from_page(page: Page<'_, &'a R>, total_matching: usize, offset: usize, view_mode: ViewMode) -> Self {
        VisibleSlice {
            visible_records: page.items.to_vec(),
            total_matching,
            total_pages: page.total_pages,
            current_page: page.page_number,
            offset,
            view_mode,
        }
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// "Showing 4-6 of 7"
    pub fn caption(&self) -> String {
        if self.visible_records.is_empty() {
            return format!("Showing 0 of {}", self.total_matching);
        }
        format!(
            "Showing {}-{} of {}",
            self.offset + 1,
            self.offset + self.visible_records.len(),
            self.total_matching
        )
    }
}

// ============================================================================
// PIPELINE
// ============================================================================

/// Steps 1-3: filter, search and sort the full dataset
pub fn match_and_sort<'a, R: Listable>(
    records: &'a [R],
    config: &DatasetConfig,
    criteria: &Criteria,
) -> Vec<&'a R> {
    let filtered = config
        .filter_predicate()
        .apply(records, &criteria.active_filter);

    let mut matched = config
        .search_matcher()
        .apply(filtered, &criteria.search_query);

    config
        .sort_registry()
        .sort(&mut matched, &criteria.sort_key);

    matched
}

/// Step 5: slice one page out of an already sorted sequence
fn slice_page<'a, R>(
    matched: &[&'a R],
    page_size: usize,
    criteria: &Criteria,
) -> VisibleSlice<'a, R> {
    let page = pagination::paginate(matched, page_size, criteria.current_page);
    let offset = (page.page_number - 1) * page_size.max(1);
    VisibleSlice::from_page(page, matched.len(), offset, criteria.view_mode)
}

/// Stateless one-shot: `(dataset, criteria) → visible slice`
pub fn query<'a, R: Listable>(
    records: &'a [R],
    config: &DatasetConfig,
    criteria: &Criteria,
) -> VisibleSlice<'a, R> {
    let matched = match_and_sort(records, config, criteria);
    slice_page(&matched, config.page_size, criteria)
}

// ============================================================================
// LISTING CONTROLLER
// ============================================================================

pub struct ListingController<'a, R> {
    records: &'a [R],
    config: &'a DatasetConfig,
    criteria: Criteria,

    /// Output of filter + search + sort for the current criteria
    matched: Vec<&'a R>,

    /// Number of full filter/search/sort passes so far
    pipeline_runs: u64,
}

impl<'a, R: Listable> ListingController<'a, R> {
    /// Start a listing session with the config's default criteria
    pub fn new(records: &'a [R], config: &'a DatasetConfig) -> Self {
        Self::with_criteria(records, config, Criteria::for_config(config))
    }

    pub fn with_criteria(records: &'a [R], config: &'a DatasetConfig, criteria: Criteria) -> Self {
        let mut controller = ListingController {
            records,
            config,
            criteria,
            matched: Vec::new(),
            pipeline_runs: 0,
        };
        controller.recompute();
        controller.clamp_current_page();
        controller
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn config(&self) -> &'a DatasetConfig {
        self.config
    }

    pub fn pipeline_runs(&self) -> u64 {
        self.pipeline_runs
    }

    pub fn total_matching(&self) -> usize {
        self.matched.len()
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.matched.len(), self.config.page_size)
    }

    /// Apply a full set of criteria and return the visible slice.
    ///
    /// The result depends only on the dataset and `criteria`: the requested
    /// page is served after clamping. A changed filter, query or sort reruns
    /// the pipeline; a page or view-mode change only re-slices.
    pub fn configure(&mut self, criteria: Criteria) -> VisibleSlice<'a, R> {
        let rerun = self.criteria.changes_result_set(&criteria);
        self.criteria = criteria;

        if rerun {
            self.recompute();
        }
        self.clamp_current_page();

        self.visible()
    }

    /// Select a filter label; a different label goes back to page 1
    pub fn set_filter(&mut self, label: impl Into<String>) {
        let next = self.criteria.clone().with_filter(label);
        self.configure_from_page_one(next);
    }

    /// Set the search text; a different query goes back to page 1
    pub fn set_search_query(&mut self, query: impl Into<String>) {
        let next = self.criteria.clone().with_search(query);
        self.configure_from_page_one(next);
    }

    /// Select a sort strategy; a different key goes back to page 1
    pub fn set_sort_key(&mut self, sort_key: impl Into<String>) {
        let next = self.criteria.clone().with_sort(sort_key);
        self.configure_from_page_one(next);
    }

    pub fn set_page(&mut self, page: usize) {
        let next = self.criteria.clone().with_page(page);
        self.configure(next);
    }

    pub fn set_view_mode(&mut self, view_mode: ViewMode) {
        self.criteria.view_mode = view_mode;
    }

    pub fn next_page(&mut self) {
        self.set_page(self.criteria.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.set_page(self.criteria.current_page.saturating_sub(1));
    }

    /// Current visible slice; re-slices the cached sorted sequence
    pub fn visible(&self) -> VisibleSlice<'a, R> {
        slice_page(&self.matched, self.config.page_size, &self.criteria)
    }

    fn configure_from_page_one(&mut self, next: Criteria) {
        let next = if self.criteria.changes_result_set(&next) {
            next.with_page(1)
        } else {
            next
        };
        self.configure(next);
    }

    fn recompute(&mut self) {
        self.matched = match_and_sort(self.records, self.config, &self.criteria);
        self.pipeline_runs += 1;

        tracing::trace!(
            listing = %self.config.name,
            filter = %self.criteria.active_filter,
            query = %self.criteria.search_query,
            sort = %self.criteria.sort_key,
            matched = self.matched.len(),
            "listing recomputed"
        );
    }

    fn clamp_current_page(&mut self) {
        self.criteria.current_page =
            pagination::clamp_page(self.criteria.current_page, self.total_pages());
    }
}

// ============================================================================
// TESTS
// ============================================================================
