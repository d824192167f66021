//! View controller
//!
//! `ViewController` is the single owner of the view state: the canonical transaction
//! set of the last successful job, the filter/sort criteria, and the page position.
//! User actions mutate state only through its methods; every derived view is
//! recomputed from scratch through the pure functions in [`crate::core::filter`]
//! and [`crate::core::pagination`].
//!
//! Any change that produces a new result set (filter text, height bounds, sort mode,
//! page size, a new job result) resets the page to 1.

use crate::core::filter::{apply_view, SortMode, ViewCriteria};
use crate::core::pagination::{paginate, Page, PageState, DEFAULT_PAGE_SIZE};
use crate::types::{BlockHeight, JobResult, ResultMeta, Transaction};

/// Owner of the canonical transaction set and everything derived from it
#[derive(Debug, Clone, Default)]
pub struct ViewController {
    /// Snapshot of the last successful job, never reordered
    transactions: Vec<Transaction>,

    meta: Option<ResultMeta>,
    raw_text: String,
    criteria: ViewCriteria,
    page: PageState,
}

impl ViewController {
    /// Create an empty controller with default criteria
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the canonical set with a freshly completed job
    ///
    /// Criteria and paging go back to their defaults, as for a fresh controller.
    pub fn load(&mut self, result: JobResult) {
        *self = Self {
            transactions: result.transactions,
            meta: Some(result.meta),
            raw_text: result.raw_text,
            ..Self::default()
        };
    }

    /// Drop all results and restore default criteria and paging
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn meta(&self) -> Option<&ResultMeta> {
        self.meta.as_ref()
    }

    /// The backend's original report, unfiltered
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn criteria(&self) -> &ViewCriteria {
        &self.criteria
    }

    pub fn page_state(&self) -> &PageState {
        &self.page
    }

    /// Set the free-text query; surrounding whitespace is ignored
    pub fn set_filter_text(&mut self, text: &str) {
        self.criteria.filter_text = text.trim().to_string();
        self.page.current_page = 1;
    }

    pub fn set_height_from(&mut self, height: Option<BlockHeight>) {
        self.criteria.height_from = height;
        self.page.current_page = 1;
    }

    pub fn set_height_to(&mut self, height: Option<BlockHeight>) {
        self.criteria.height_to = height;
        self.page.current_page = 1;
    }

    pub fn set_sort_mode(&mut self, mode: SortMode) {
        self.criteria.sort_mode = mode;
        self.page.current_page = 1;
    }

    /// Set the page size; zero falls back to the default
    pub fn set_page_size(&mut self, size: usize) {
        self.page.page_size = if size == 0 { DEFAULT_PAGE_SIZE } else { size };
        self.page.current_page = 1;
    }

    /// Toggle showing every transaction on one page
    ///
    /// The page position is kept so turning it off returns to the same page.
    pub fn set_show_all(&mut self, show_all: bool) {
        self.page.show_all = show_all;
    }

    /// Filtered and sorted view of the full canonical set
    pub fn ordered(&self) -> Vec<&Transaction> {
        apply_view(&self.transactions, &self.criteria)
    }

    /// Number of transactions in the filtered view
    pub fn filtered_len(&self) -> usize {
        self.ordered().len()
    }

    /// Move to `page`, clamped into the valid range
    ///
    /// Ignored while showing all.
    pub fn go_to_page(&mut self, page: usize) {
        if self.page.show_all {
            return;
        }
        let total_pages = self.page.total_pages(self.filtered_len());
        self.page.current_page = page.clamp(1, total_pages);
    }

    pub fn first_page(&mut self) {
        self.go_to_page(1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.page.current_page.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.page.current_page + 1);
    }

    pub fn last_page(&mut self) {
        self.go_to_page(usize::MAX);
    }

    /// Compute the visible page
    ///
    /// Writes the clamped page number back, so a view that shrank below the
    /// previous page corrects itself.
    pub fn current_page(&mut self) -> ViewPage {
        let ordered = apply_view(&self.transactions, &self.criteria);
        let page = paginate(&ordered, &self.page);
        self.page.current_page = page.current_page;
        ViewPage::from_page(&page)
    }
}

/// Owned snapshot of one visible page
#[derive(Debug, Clone, PartialEq)]
pub struct ViewPage {
    pub transactions: Vec<Transaction>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total: usize,
    pub label: String,
    pub controls_visible: bool,
    pub can_go_back: bool,
    pub can_go_forward: bool,
}

impl ViewPage {
    fn from_page(page: &Page<'_, &Transaction>) -> Self {
        ViewPage {
            transactions: page.items.iter().map(|tx| (*tx).clone()).collect(),
            current_page: page.current_page,
            total_pages: page.total_pages,
            total: page.total,
            label: page.label(),
            controls_visible: page.controls_visible(),
            can_go_back: page.can_go_back(),
            can_go_forward: page.can_go_forward(),
        }
    }
}
