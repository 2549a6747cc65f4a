//! Value objects

mod paging;

pub use paging::{PageRequest, PageResponse, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
