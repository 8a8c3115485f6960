use serde::Serialize;

/// One page of results. `total_pages` is `ceil(total / page_size)`, so an
/// empty input has zero pages; the zero-results presentation is a separate
/// concern for the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub total_pages: usize,
    pub total: usize,
}

/// 1-indexed slicing. A page outside `[1, total_pages]` yields an empty
/// item slice; no clamping is done here, staying inside the valid range is
/// the caller's job.
pub fn paginate<T: Clone>(entries: &[T], page: usize, page_size: usize) -> Page<T> {
    let total = entries.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        (total + page_size - 1) / page_size
    };

    let start = page.saturating_sub(1).saturating_mul(page_size);
    let items = if page_size == 0 || start >= total {
        Vec::new()
    } else {
        entries[start..(start + page_size).min(total)].to_vec()
    };

    Page {
        items,
        page,
        total_pages,
        total,
    }
}
