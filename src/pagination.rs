// 📄 Paginator - fixed-size pages with clamped page numbers
// An empty sequence is still "page 1 of 1"; out-of-range page numbers are
// corrected, never rejected.

use serde::Serialize;

/// One page of an ordered sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<'a, T> {
    pub items: &'a [T],

    /// Page actually served, after clamping (1-based)
    pub page_number: usize,

    /// Always >= 1
    pub total_pages: usize,
}

/// `max(1, ceil(len / page_size))`; a zero page size counts as 1
pub fn total_pages(len: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    len.div_ceil(page_size).max(1)
}

/// Clamp a requested page number into `[1, total_pages]`
pub fn clamp_page(page_number: usize, total_pages: usize) -> usize {
    page_number.clamp(1, total_pages.max(1))
}

/// Slice `[(page-1)*size, page*size)` out of `sequence`
pub fn paginate<T>(sequence: &[T], page_size: usize, page_number: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = total_pages(sequence.len(), page_size);
    let page_number = clamp_page(page_number, total_pages);

    let start = ((page_number - 1) * page_size).min(sequence.len());
    let end = (page_number * page_size).min(sequence.len());

    Page {
        items: &sequence[start..end],
        page_number,
        total_pages,
    }
}
