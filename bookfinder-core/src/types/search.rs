//! Search queries and their results

use super::BookSummary;
use crate::pagination::total_pages;
use serde::{Deserialize, Serialize};

/// One page of a title search
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    pub title: String,

    /// 1-indexed page number
    pub page: u32,

    /// Results per page
    pub page_size: u32,
}

impl SearchQuery {
    /// First page of a search (0 page size treated as 1)
    pub fn new(title: impl Into<String>, page_size: u32) -> Self {
        Self {
            title: title.into(),
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// The same search at another page (0 treated as 1)
    pub fn at_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Whether the title has anything to search for
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty()
    }

    /// Number of results skipped before this page
    pub fn offset(&self) -> u64 {
        u64::from(self.page.max(1) - 1) * u64::from(self.page_size)
    }

    /// Exact cache identity of this query
    pub fn cache_key(&self) -> String {
        format!("search:{}:{}:{}", self.title, self.page, self.page_size)
    }
}

/// One page of search results with derived pagination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub total_found: u64,
    pub items: Vec<BookSummary>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl SearchResult {
    /// Attach pagination metadata for `query` to a page of items
    pub fn new(query: &SearchQuery, total_found: u64, items: Vec<BookSummary>) -> Self {
        Self {
            total_found,
            items,
            current_page: query.page,
            total_pages: total_pages(total_found, query.page_size),
        }
    }

    /// No matches at all
    pub fn is_empty(&self) -> bool {
        self.total_found == 0
    }
}
