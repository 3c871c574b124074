use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Zero-based page coordinates, always within the accepted bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    size: i64,
}

impl PageRequest {
    /**
     * Negative pages collapse to the first page. Sizes outside 1..=100 fall
     * back to the default size.
     */
    pub fn normalized(page: i64, size: i64) -> Self {
        let page = page.max(0);
        let size = if size <= 0 || size > MAX_PAGE_SIZE {
            DEFAULT_PAGE_SIZE
        } else {
            size
        };
        Self { page, size }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn size(&self) -> i64 {
        self.size
    }

    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::normalized(0, DEFAULT_PAGE_SIZE)
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub page_number: i64,
    pub page_size: i64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: i64, request: PageRequest) -> Self {
        let total_pages = (total_elements + request.size() - 1) / request.size();
        Self {
            content,
            total_elements,
            total_pages,
            page_number: request.page(),
            page_size: request.size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_sizes_fall_back_to_default() {
        for size in [0, -1, 101, i64::MAX] {
            assert_eq!(PageRequest::normalized(0, size).size(), DEFAULT_PAGE_SIZE);
        }
        assert_eq!(PageRequest::normalized(0, 1).size(), 1);
        assert_eq!(PageRequest::normalized(0, 100).size(), 100);
    }

    #[test]
    fn negative_page_is_first_page() {
        assert_eq!(PageRequest::normalized(-5, 20), PageRequest::normalized(0, 20));
        assert_eq!(PageRequest::normalized(3, 20).offset(), 60);
        assert_eq!(PageRequest::normalized(i64::MAX, 100).offset(), i64::MAX);
    }

    #[test]
    fn total_pages_rounds_up() {
        let request = PageRequest::normalized(0, 10);
        assert_eq!(Page::<()>::new(vec![], 0, request).total_pages, 0);
        assert_eq!(Page::<()>::new(vec![], 10, request).total_pages, 1);
        assert_eq!(Page::<()>::new(vec![], 11, request).total_pages, 2);
    }

    #[test]
    fn serializes_in_camel_case() {
        let page = Page::new(vec![1, 2], 2, PageRequest::default());
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalElements"], 2);
        assert_eq!(json["pageNumber"], 0);
        assert_eq!(json["pageSize"], 10);
        assert_eq!(json["content"], serde_json::json!([1, 2]));
    }
}
