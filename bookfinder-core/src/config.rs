//! Catalog client configuration

use std::time::Duration;

/// Default Open Library API root
pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org/";

/// Default Open Library cover image host
pub const DEFAULT_COVERS_URL: &str = "https://covers.openlibrary.org";

/// Items per page
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Quiet period before live input becomes the effective query
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Settings shared by the catalog client and the search session
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// API root, always normalized to end with `/`
    pub base_url: String,

    /// Cover image host, without a trailing `/`
    pub covers_url: String,

    /// Results per search page
    pub page_size: u32,

    /// Debounce window for typed input
    pub debounce: Duration,

    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            covers_url: DEFAULT_COVERS_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            debounce: DEFAULT_DEBOUNCE,
            user_agent: concat!("bookfinder/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl CatalogConfig {
    /// Override the API root
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        self.base_url = base_url;
        self
    }

    /// Override the cover image host
    pub fn with_covers_url(mut self, covers_url: impl Into<String>) -> Self {
        self.covers_url = covers_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the page size (0 is treated as 1)
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Override the debounce window
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }
}
