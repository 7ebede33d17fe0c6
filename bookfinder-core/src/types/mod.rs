//! Core types for catalog records and session state

mod cover;
mod search;
mod summary;
mod text;
mod viewed;
mod work;

pub use cover::{author_photo_url, cover_url, CoverSize};
pub use search::{SearchQuery, SearchResult};
pub use summary::{access_badge_text, extract_book_id, BookSummary, EbookAccess, UNKNOWN_AUTHOR};
pub use text::{normalize_text, TextValue};
pub use viewed::ViewedBookRecord;
pub use work::{
    AuthorDetails, ExternalLink, WorkDetails, MAX_DISPLAYED_SUBJECTS, NO_DESCRIPTION,
    UNKNOWN_PUBLISH_DATE,
};
