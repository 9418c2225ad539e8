//! Page arithmetic

use std::ops::Range;

pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Number of pages for `len` rows; never less than one
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let size = page_size.max(1);
    len.div_ceil(size).max(1)
}

/// Clamp a 1-based page into `[1, total_pages]`
pub fn clamp_page(page: usize, len: usize, page_size: usize) -> usize {
    page.clamp(1, total_pages(len, page_size))
}

/// Slice bounds of `page` (1-based) within `len` rows
pub fn page_range(page: usize, len: usize, page_size: usize) -> Range<usize> {
    let size = page_size.max(1);
    let page = clamp_page(page, len, size);
    let start = ((page - 1) * size).min(len);
    let end = (start + size).min(len);
    start..end
}

/// Rank shown in the index column: global across pages
pub fn global_index(page: usize, page_size: usize, local_index: usize) -> usize {
    (page.max(1) - 1) * page_size + local_index + 1
}
