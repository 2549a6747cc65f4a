//! Paging value objects
//!
//! A bounded page request plus the page-of-items response every paged
//! query returns. Construction clamps out-of-range values instead of
//! failing, so a hostile page size of 1000 simply becomes the maximum.

/// Default page size when the caller does not specify one
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Maximum page size
pub const MAX_PAGE_SIZE: i64 = 50;

/// Validated page request (page numbers start at 1)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    /// Create a page request, clamping `page_number >= 1` and
    /// `1 <= page_size <= MAX_PAGE_SIZE`
    pub fn new(page_number: i64, page_size: i64) -> Self {
        Self {
            page_number: page_number.max(1),
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// The first page at the default size
    pub fn first() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of items to skip
    pub fn offset(&self) -> i64 {
        (self.page_number - 1) * self.page_size
    }

    /// Number of items to take
    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// One page of a larger ordered result set, with total-count metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_count: i64,
    pub total_pages: i64,
}

impl<T> PageResponse<T> {
    /// Build a response from one page of items and the unpaged total count
    pub fn new(items: Vec<T>, request: PageRequest, total_count: i64) -> Self {
        let total_pages = if total_count == 0 {
            0
        } else {
            (total_count + request.page_size() - 1) / request.page_size()
        };
        Self {
            items,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_count,
            total_pages,
        }
    }

    /// Project the items, keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> PageResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PageResponse {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
