use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 50;

/// Paging information derived from the total matching count.
///
/// Serialized into the `X-Pagination` response header on list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMetadata {
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
}

impl PageMetadata {
    pub fn new(current_page: usize, page_size: usize, total_count: usize) -> Self {
        let current_page = if current_page == 0 { 1 } else { current_page };
        let total_pages = total_count.div_ceil(page_size.max(1));

        Self {
            current_page,
            page_size,
            total_count,
            total_pages,
        }
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }
}

/// A single page of items together with its metadata.
#[derive(Debug, Serialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub metadata: PageMetadata,
}

impl<T> Paged<T> {
    pub fn new(items: Vec<T>, metadata: PageMetadata) -> Self {
        Self { items, metadata }
    }
}
