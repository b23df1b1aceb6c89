//! Pagination envelope.

use serde::{Deserialize, Serialize};

/// Pagination metadata returned with every list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Total number of items across all pages.
    pub count: u32,
    /// Total number of pages.
    pub pages: u32,
    /// Absolute URL of the next page. Absent on the last page.
    pub next: Option<String>,
    /// Absolute URL of the previous page. Absent on the first page.
    pub prev: Option<String>,
}

impl PageInfo {
    /// Returns true if the server advertised another page.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// One page of a list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Pagination metadata.
    pub info: PageInfo,
    /// The entities on this page.
    pub results: Vec<T>,
}
