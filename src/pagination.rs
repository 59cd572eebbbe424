//! Page metadata attached to list responses.

use serde::Serialize;

/// Page numbers to show around `current_page`; `None` marks an elided gap.
fn page_window(
    total_pages: usize,
    current_page: usize,
    edge: usize,
    around_current: usize,
) -> Vec<Option<usize>> {
    if total_pages == 0 {
        return vec![];
    }

    let left_end = (1 + edge).min(total_pages + 1);
    let mut pages: Vec<Option<usize>> = (1..left_end).map(Some).collect();

    let mid_start = left_end.max(current_page.saturating_sub(around_current));
    let mid_end = (current_page + around_current + 1).min(total_pages + 1);
    if mid_start > left_end {
        pages.push(None);
    }
    pages.extend((mid_start..mid_end).map(Some));

    let right_start = mid_end.max(total_pages.saturating_sub(edge) + 1);
    if right_start > mid_end {
        pages.push(None);
    }
    pages.extend((right_start..=total_pages).map(Some));

    pages
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    /// Page links for the dashboard pager.
    pub pages: Vec<Option<usize>>,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, page: usize, per_page: usize, total: usize) -> Self {
        let page = page.max(1);
        let total_pages = if per_page == 0 {
            0
        } else {
            total.div_ceil(per_page)
        };

        Self {
            items,
            page,
            per_page,
            total,
            total_pages,
            pages: page_window(total_pages, page, 2, 2),
        }
    }
}
