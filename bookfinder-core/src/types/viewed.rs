//! Recently viewed book records

use super::BookSummary;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A book the user opened, as kept in the recently viewed list
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ViewedBookRecord {
    pub book_id: String,
    pub title: String,
    pub author: String,

    /// Older lists stored this as `clickedAt`
    #[serde(alias = "clickedAt")]
    pub viewed_at: DateTime<Utc>,
}

impl ViewedBookRecord {
    pub fn new(
        book_id: impl Into<String>,
        title: impl Into<String>,
        author: impl Into<String>,
        viewed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            book_id: book_id.into(),
            title: title.into(),
            author: author.into(),
            viewed_at,
        }
    }

    /// Record for opening a search result now
    pub fn from_summary(book: &BookSummary) -> Self {
        Self::new(&book.id, &book.title, book.primary_author(), Utc::now())
    }
}
