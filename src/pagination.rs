//! Page-count metadata returned alongside every list response.

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PageMetadata {
    pub current_page: i64,
    pub page_size: i64,
    pub first_page: i64,
    pub last_page: i64,
    pub total_records: i64,
}

impl PageMetadata {
    /// Builds metadata for `total_records` rows split into pages of `page_size`.
    ///
    /// Inputs are expected to come from a validated filter. An empty result
    /// yields all zeros.
    pub fn calculate(total_records: i64, page: i64, page_size: i64) -> Self {
        if total_records <= 0 || page_size <= 0 {
            return Self::default();
        }

        Self {
            current_page: page,
            page_size,
            first_page: 1,
            last_page: (total_records + page_size - 1) / page_size,
            total_records,
        }
    }
}

/// A page of rows and its metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub metadata: PageMetadata,
}

impl<T> Page<T> {
    pub fn new(data: Vec<T>, total_records: i64, page: i64, page_size: i64) -> Self {
        Self {
            data,
            metadata: PageMetadata::calculate(total_records, page, page_size),
        }
    }
}
