//! Client-side pagination over a fixed list of entries.
//!
//! Pages are numbered from 1, like the page buttons shown to the user.

use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    total_items: usize,
    per_page: usize,
    current_page: usize,
}

impl Paginator {
    /// A `per_page` of zero is treated as one item per page.
    pub fn new(total_items: usize, per_page: usize) -> Self {
        let per_page = per_page.max(1);
        Self {
            total_items,
            per_page,
            current_page: 1,
        }
    }

    pub fn page_count(&self) -> usize {
        self.total_items.div_ceil(self.per_page)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Switches to `page`, clamped to the existing pages, and returns its item range.
    pub fn show_page(&mut self, page: usize) -> Range<usize> {
        let last = self.page_count().max(1);
        self.current_page = page.clamp(1, last);
        debug!(
            "Showing page {}/{} ({} items per page)",
            self.current_page,
            self.page_count(),
            self.per_page
        );
        self.visible_range()
    }

    /// Item indices on the current page
    pub fn visible_range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.per_page).min(self.total_items);
        let end = (start + self.per_page).min(self.total_items);
        start..end
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.visible_range().contains(&index)
    }
}
