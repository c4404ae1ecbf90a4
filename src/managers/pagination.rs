//! Client-side paging of the visible bookmark sequence.

use serde::Serialize;

use crate::types::errors::PaginationError;

/// One page of rows plus the numbers a pagination bar needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageView<T> {
    pub rows: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// Tracks the current page and page size of the table.
#[derive(Debug, Clone)]
pub struct Pager {
    page: usize,
    page_size: usize,
    options: Vec<usize>,
}

impl Pager {
    /// Falls back to the first option when `page_size` is not one of `options`.
    pub fn new(page_size: usize, options: Vec<usize>) -> Self {
        let options: Vec<usize> = options.into_iter().filter(|s| *s > 0).collect();
        let options = if options.is_empty() { vec![page_size.max(1)] } else { options };
        let page_size = if options.contains(&page_size) { page_size } else { options[0] };
        Self {
            page: 1,
            page_size,
            options,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn options(&self) -> &[usize] {
        &self.options
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<(), PaginationError> {
        if !self.options.contains(&size) {
            return Err(PaginationError::InvalidPageSize(size));
        }
        self.page_size = size;
        Ok(())
    }

    /// Quick-jump. Out-of-range pages are clamped when the next view is built.
    pub fn jump_to(&mut self, page: usize) {
        self.page = page.max(1);
    }

    /// Slices `rows` for the current page, clamping the page into range first.
    pub fn view<T: Clone>(&mut self, rows: &[T]) -> PageView<T> {
        let total = rows.len();
        let total_pages = self.total_pages(total);
        self.page = self.page.clamp(1, total_pages);

        let start = (self.page - 1) * self.page_size;
        let end = (start + self.page_size).min(total);
        let rows = if start < end { rows[start..end].to_vec() } else { Vec::new() };

        PageView {
            rows,
            page: self.page,
            page_size: self.page_size,
            total_pages,
            total,
        }
    }
}
