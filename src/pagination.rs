//! Page slicing and navigation state.

use serde::Serialize;

/// Number of pages needed for `count` rows; zero when there are no rows.
pub const fn total_pages(count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    count.div_ceil(page_size)
}

/// Pagination metadata for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    /// 1-based position of the first row shown, or 0 when there are no rows
    pub start: usize,
    /// 1-based position of the last row shown
    pub end: usize,
    pub total_records: usize,
    pub current_page: usize,
    /// Never less than 1, even for an empty result
    pub total_pages: usize,
    pub page_size: usize,
    pub can_first: bool,
    pub can_prev: bool,
    pub can_next: bool,
    pub can_last: bool,
}

impl PageInfo {
    pub fn new(count: usize, page_size: usize, page: usize) -> Self {
        let pages = total_pages(count, page_size);
        let start = if count > 0 {
            page
                .saturating_sub(1)
                .saturating_mul(page_size)
                .saturating_add(1)
        } else {
            0
        };
        let end = page.saturating_mul(page_size).min(count);

        Self {
            start,
            end,
            total_records: count,
            current_page: page,
            total_pages: pages.max(1),
            page_size,
            can_first: page > 1,
            can_prev: page > 1,
            can_next: page < pages,
            can_last: page < pages,
        }
    }
}

/// One page worth of rows plus its metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub slice: &'a [T],
    pub info: PageInfo,
}

/// Slice `rows` to the requested 1-based page.
///
/// A page past the end yields an empty slice rather than panicking.
pub fn paginate<T>(rows: &[T], page_size: usize, page: usize) -> Page<'_, T> {
    let info = PageInfo::new(rows.len(), page_size, page);
    let from = page.saturating_sub(1).saturating_mul(page_size).min(rows.len());
    let to = info.end.max(from);
    Page {
        slice: &rows[from..to],
        info,
    }
}

/// Current page and page size, mutated by navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageState {
    page: usize,
    page_size: usize,
}

impl PageState {
    pub const fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: if page_size == 0 { 1 } else { page_size },
        }
    }

    pub const fn page(&self) -> usize {
        self.page
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// Change the page size and go back to the first page. Zero is ignored.
    pub fn set_page_size(&mut self, page_size: usize) -> bool {
        if page_size == 0 {
            tracing::trace!("Ignoring page size 0");
            return false;
        }
        self.page_size = page_size;
        self.page = 1;
        true
    }

    pub const fn reset(&mut self) {
        self.page = 1;
    }

    /// Move to `page` if it lies within `[1, total pages]`; otherwise nothing changes.
    pub fn go_to(&mut self, page: usize, count: usize) -> bool {
        let pages = total_pages(count, self.page_size);
        if (1..=pages).contains(&page) {
            self.page = page;
            true
        } else {
            tracing::trace!("Ignoring navigation to page {} of {}", page, pages);
            false
        }
    }

    /// Pull the page back into range after the result count changed.
    pub fn clamp(&mut self, count: usize) {
        let last = total_pages(count, self.page_size).max(1);
        self.page = self.page.clamp(1, last);
    }

    pub fn info(&self, count: usize) -> PageInfo {
        PageInfo::new(count, self.page_size, self.page)
    }
}
