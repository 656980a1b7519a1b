//! Pagination related types for list endpoints

use serde::{Deserialize, Serialize};

/// Default number of items per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Upper bound on the page size a client may request
pub const MAX_PAGE_SIZE: u32 = 50;

/// Paging parameters accepted on list endpoints (`?pageNumber=2&pageSize=20`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParams {
    /// Current page number (1-indexed)
    #[serde(default = "default_page_number")]
    pub page_number: u32,

    /// Number of items per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
        }
    }
}

impl RequestParams {
    /// Create paging parameters, clamped to the accepted bounds
    pub fn new(page_number: u32, page_size: u32) -> Self {
        Self {
            page_number,
            page_size,
        }
        .normalized()
    }

    /// Clamp page number to >= 1 and page size to 1..=MAX_PAGE_SIZE
    pub fn normalized(self) -> Self {
        Self {
            page_number: self.page_number.max(1),
            page_size: self.page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Rows to skip for this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page_number.saturating_sub(1)) * u64::from(self.page_size)
    }

    /// Rows to take for this page
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }
}

/// Paginated response wrapper with metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedResponse<T> {
    /// The items on this page
    pub data: Vec<T>,

    pub page_number: u32,
    pub page_size: u32,

    /// Number of rows matching the query across all pages
    pub total_count: u64,

    pub total_pages: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> PaginatedResponse<T> {
    /// Create a new paginated response
    pub fn new(data: Vec<T>, params: RequestParams, total_count: u64) -> Self {
        let params = params.normalized();
        let total_pages = Self::calculate_total_pages(total_count, params.page_size);

        Self {
            data,
            page_number: params.page_number,
            page_size: params.page_size,
            total_count,
            total_pages,
            has_next: params.page_number < total_pages,
            has_prev: params.page_number > 1,
        }
    }

    /// Create an empty paginated response
    pub fn empty(params: RequestParams) -> Self {
        Self::new(Vec::new(), params, 0)
    }

    fn calculate_total_pages(total: u64, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        let pages = total.div_ceil(u64::from(page_size));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Map the items to a different type, keeping the metadata
    pub fn map<U, F>(self, f: F) -> PaginatedResponse<U>
    where
        F: FnMut(T) -> U,
    {
        PaginatedResponse {
            data: self.data.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_count: self.total_count,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

fn default_page_number() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_params_defaults() {
        let params = RequestParams::default();
        assert_eq!(params.page_number, 1);
        assert_eq!(params.page_size, 10);
        assert_eq!(params.offset(), 0);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_request_params_clamped() {
        let params = RequestParams::new(0, 500);
        assert_eq!(params.page_number, 1);
        assert_eq!(params.page_size, MAX_PAGE_SIZE);

        let params = RequestParams::new(3, 0);
        assert_eq!(params.page_size, 1);
        assert_eq!(params.offset(), 2);
    }

    #[test]
    fn test_request_params_camel_case() {
        let params: RequestParams =
            serde_json::from_str(r#"{"pageNumber": 4, "pageSize": 25}"#).unwrap();
        assert_eq!(params, RequestParams::new(4, 25));
        assert_eq!(params.offset(), 75);

        let params: RequestParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, RequestParams::default());
    }

    #[test]
    fn test_paginated_response_metadata() {
        let page = PaginatedResponse::new(vec![1, 2, 3], RequestParams::new(2, 3), 8);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
        assert!(page.has_prev);

        let last = PaginatedResponse::new(vec![7, 8], RequestParams::new(3, 3), 8);
        assert!(!last.has_next);
    }

    #[test]
    fn test_paginated_response_empty_and_map() {
        let empty: PaginatedResponse<i32> = PaginatedResponse::empty(RequestParams::default());
        assert_eq!(empty.total_pages, 0);
        assert!(!empty.has_next);
        assert!(!empty.has_prev);

        let mapped = PaginatedResponse::new(vec![1, 2], RequestParams::default(), 2)
            .map(|n| n.to_string());
        assert_eq!(mapped.data, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.total_count, 2);
    }

    #[test]
    fn test_paginated_response_serializes_camel_case() {
        let page = PaginatedResponse::new(vec!["a"], RequestParams::default(), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalCount"], 1);
        assert_eq!(json["pageNumber"], 1);
        assert_eq!(json["hasNext"], false);
    }
}
