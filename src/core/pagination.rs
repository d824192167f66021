//! Pagination engine
//!
//! Cuts the ordered view into pages. [`paginate`] is pure: it never mutates the page
//! state it is given and reports the clamped page back through [`Page::current_page`],
//! so the owner can write the correction back.

/// Default number of transactions per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page position of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number
    pub current_page: usize,
    pub page_size: usize,
    pub show_all: bool,
}

impl Default for PageState {
    fn default() -> Self {
        PageState {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            show_all: false,
        }
    }
}

impl PageState {
    /// Page size with the zero guard applied
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }

    /// Number of pages needed for `total` items, never less than one
    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.effective_page_size()).max(1)
    }
}

/// Visible slice of the view plus everything the page controls need
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],

    /// Page actually shown, after clamping
    pub current_page: usize,
    pub total_pages: usize,

    /// Number of items in the whole view
    pub total: usize,
    pub page_size: usize,
    pub show_all: bool,
}

impl<T> Page<'_, T> {
    /// Whether the page controls should be shown at all
    pub fn controls_visible(&self) -> bool {
        self.total > 0 && (self.show_all || self.total > self.page_size)
    }

    pub fn can_go_back(&self) -> bool {
        !self.show_all && self.current_page > 1
    }

    pub fn can_go_forward(&self) -> bool {
        !self.show_all && self.current_page < self.total_pages
    }

    /// Status label for the page controls
    pub fn label(&self) -> String {
        if self.show_all {
            format!("Showing all {} transactions", self.total)
        } else {
            format!("Page {} of {}", self.current_page, self.total_pages)
        }
    }
}

/// Select the visible slice of `items` for `state`
pub fn paginate<'a, T>(items: &'a [T], state: &PageState) -> Page<'a, T> {
    let total = items.len();
    let page_size = state.effective_page_size();
    let total_pages = state.total_pages(total);

    if state.show_all {
        return Page {
            items,
            current_page: state.current_page.clamp(1, total_pages),
            total_pages,
            total,
            page_size,
            show_all: true,
        };
    }

    let current_page = state.current_page.clamp(1, total_pages);
    let start = ((current_page - 1) * page_size).min(total);
    let end = (start + page_size).min(total);

    Page {
        items: &items[start..end],
        current_page,
        total_pages,
        total,
        page_size,
        show_all: false,
    }
}
