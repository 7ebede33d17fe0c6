//! Bookfinder Core Library
//!
//! This crate provides the interaction layer of the Bookfinder book discovery
//! client: a cached Open Library catalog client, title search orchestration
//! with debounced input and pagination, work/author detail lookups, and the
//! recently viewed list persisted to local storage.

pub mod catalog;
pub mod config;
pub mod detail;
pub mod error;
pub mod pagination;
pub mod recent;
pub mod search;
pub mod storage;
pub mod types;

pub use catalog::{CatalogClient, CatalogTransport, HttpTransport, QueryStatus};
pub use config::CatalogConfig;
pub use detail::{DetailView, Lookup};
pub use error::{BookfinderError, CatalogError, Result, StorageError};
pub use pagination::{total_pages, window, PageLink, Pagination};
pub use recent::RecentlyViewed;
pub use search::{SearchSession, SearchState, EXAMPLE_QUERIES};
pub use types::{
    AuthorDetails, BookSummary, CoverSize, EbookAccess, ExternalLink, SearchQuery, SearchResult,
    ViewedBookRecord, WorkDetails,
};
