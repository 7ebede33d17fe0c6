//! Client for the Open Library catalog
//!
//! Three read-only queries, each cached by its exact key for the lifetime of
//! the client. Queries with an empty input are skipped and resolve to
//! `Ok(None)` without touching the network.

mod cache;
mod transport;
mod wire;

#[cfg(test)]
pub(crate) mod testing;

pub use cache::{QueryCache, QueryStatus};
pub use transport::{CatalogTransport, HttpTransport};

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::types::{AuthorDetails, SearchQuery, SearchResult, WorkDetails};
use std::sync::Arc;
use wire::{AuthorDocument, SearchDocument, WorkDocument};

/// Path and query string of a title search
pub fn search_path(query: &SearchQuery) -> String {
    format!(
        "search.json?q=title:{}+AND+cover_i:*&limit={}&offset={}",
        urlencoding::encode(&query.title),
        query.page_size,
        query.offset()
    )
}

/// Path of a work document
pub fn work_path(id: &str) -> String {
    format!("works/{}.json", urlencoding::encode(id))
}

/// Path of an author document; the key carries its own `authors/` segment
pub fn author_path(key: &str) -> String {
    format!("{}.json", key.trim_start_matches('/'))
}

/// Catalog client with per-query caching
pub struct CatalogClient {
    config: CatalogConfig,
    transport: Arc<dyn CatalogTransport>,
    searches: QueryCache<SearchResult>,
    works: QueryCache<WorkDetails>,
    authors: QueryCache<AuthorDetails>,
}

impl CatalogClient {
    /// Create a client that talks HTTP to `config.base_url`
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client over any transport
    pub fn with_transport(config: CatalogConfig, transport: Arc<dyn CatalogTransport>) -> Self {
        Self {
            config,
            transport,
            searches: QueryCache::new(),
            works: QueryCache::new(),
            authors: QueryCache::new(),
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    /// Search works by title, restricted to entries that have a cover
    pub async fn search_by_title(
        &self,
        query: &SearchQuery,
    ) -> Result<Option<Arc<SearchResult>>, CatalogError> {
        if query.is_blank() {
            return Ok(None);
        }

        let transport = self.transport.clone();
        let path = search_path(query);
        let query = query.clone();
        self.searches
            .fetch(&query.cache_key(), move || async move {
                let value = transport.get_json(&path).await?;
                let document: SearchDocument = serde_json::from_value(value)?;
                let items = document.docs.into_iter().map(Into::into).collect();
                Ok(SearchResult::new(&query, document.num_found, items))
            })
            .await
            .map(Some)
    }

    /// Fetch a work by its id (e.g. `OL45804W`)
    pub async fn get_work_by_id(
        &self,
        id: &str,
    ) -> Result<Option<Arc<WorkDetails>>, CatalogError> {
        if id.is_empty() {
            return Ok(None);
        }

        let transport = self.transport.clone();
        let path = work_path(id);
        let requested = id.to_string();
        self.works
            .fetch(id, move || async move {
                let value = transport.get_json(&path).await?;
                let document: WorkDocument = serde_json::from_value(value)?;
                Ok(document.into_details(&requested))
            })
            .await
            .map(Some)
    }

    /// Fetch an author by key (e.g. `/authors/OL34184A`)
    pub async fn get_author_by_key(
        &self,
        key: &str,
    ) -> Result<Option<Arc<AuthorDetails>>, CatalogError> {
        if key.is_empty() {
            return Ok(None);
        }

        let transport = self.transport.clone();
        let path = author_path(key);
        let requested = key.to_string();
        self.authors
            .fetch(key, move || async move {
                let value = transport.get_json(&path).await?;
                let document: AuthorDocument = serde_json::from_value(value)?;
                Ok(document.into_details(&requested))
            })
            .await
            .map(Some)
    }

    /// Cache status of a search, if it was ever requested
    pub fn search_status(&self, query: &SearchQuery) -> Option<QueryStatus> {
        self.searches.status(&query.cache_key())
    }

    /// Cache status of a work lookup, if it was ever requested
    pub fn work_status(&self, id: &str) -> Option<QueryStatus> {
        self.works.status(id)
    }

    /// Cache status of an author lookup, if it was ever requested
    pub fn author_status(&self, key: &str) -> Option<QueryStatus> {
        self.authors.status(key)
    }
}
