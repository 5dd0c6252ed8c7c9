use std::ops::Range;

use crate::config::PAGE_SIZES;

/// Local pagination over the filtered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pager {
    page: usize,
    page_size: usize,
}

impl Pager {
    pub(crate) fn new(page_size: usize) -> Self {
        let page_size = if PAGE_SIZES.contains(&page_size) {
            page_size
        } else {
            PAGE_SIZES[1]
        };
        Self { page: 0, page_size }
    }

    pub(crate) fn page(&self) -> usize {
        self.page
    }

    pub(crate) fn page_size(&self) -> usize {
        self.page_size
    }

    pub(crate) fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Rows of the filtered view shown on the current page.
    pub(crate) fn range(&self, total: usize) -> Range<usize> {
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        start..end
    }

    pub(crate) fn next_page(&mut self, total: usize) -> bool {
        if self.page + 1 < self.page_count(total) {
            self.page += 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn prev_page(&mut self) -> bool {
        if self.page > 0 {
            self.page -= 1;
            true
        } else {
            false
        }
    }

    pub(crate) fn first_page(&mut self) {
        self.page = 0;
    }

    /// Step through the selectable sizes, keeping the first visible row on screen.
    pub(crate) fn cycle_page_size(&mut self, total: usize) {
        let first_row = self.page * self.page_size;
        let idx = PAGE_SIZES
            .iter()
            .position(|size| *size == self.page_size)
            .unwrap_or(0);
        self.page_size = PAGE_SIZES[(idx + 1) % PAGE_SIZES.len()];
        self.page = first_row / self.page_size;
        self.clamp(total);
    }

    /// Keep the page index valid after the filtered view changed size.
    pub(crate) fn clamp(&mut self, total: usize) {
        let last = self.page_count(total) - 1;
        if self.page > last {
            self.page = last;
        }
    }
}
