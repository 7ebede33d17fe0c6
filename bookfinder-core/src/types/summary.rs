//! Search result entries

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Fallback shown when a book lists no authors
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";

const WORK_KEY_PREFIX: &str = "/works/";

/// Extract the work id from a catalog key such as `/works/OL45804W`
///
/// Returns an empty string when the key does not carry the works prefix.
pub fn extract_book_id(key: &str) -> &str {
    key.split_once(WORK_KEY_PREFIX)
        .map(|(_, rest)| rest.split(WORK_KEY_PREFIX).next().unwrap_or_default())
        .unwrap_or_default()
}

/// Lending/availability tier of a digital edition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EbookAccess {
    #[serde(rename = "no_ebook")]
    NoEbook,
    #[serde(rename = "borrowable")]
    Borrowable,
    #[serde(rename = "printdisabled")]
    PrintDisabled,
    #[serde(rename = "public")]
    Public,
}

impl EbookAccess {
    /// Wire name of the tier
    pub fn as_str(self) -> &'static str {
        match self {
            EbookAccess::NoEbook => "no_ebook",
            EbookAccess::Borrowable => "borrowable",
            EbookAccess::PrintDisabled => "printdisabled",
            EbookAccess::Public => "public",
        }
    }
}

impl FromStr for EbookAccess {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_ebook" => Ok(EbookAccess::NoEbook),
            "borrowable" => Ok(EbookAccess::Borrowable),
            "printdisabled" => Ok(EbookAccess::PrintDisabled),
            "public" => Ok(EbookAccess::Public),
            other => Err(format!("unknown ebook access tier: {}", other)),
        }
    }
}

/// Short badge label for an access tier
pub fn access_badge_text(access: Option<EbookAccess>) -> &'static str {
    match access {
        Some(EbookAccess::NoEbook) => "No eBook",
        Some(EbookAccess::Borrowable) => "Borrow",
        Some(EbookAccess::PrintDisabled) => "Accessible Only",
        Some(EbookAccess::Public) => "Free",
        None => "No ebook",
    }
}

/// A catalog search entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookSummary {
    /// Work id derived from `key`; empty when the entry is unlinkable
    pub id: String,

    /// Raw catalog key
    pub key: String,

    pub title: String,

    pub subtitle: Option<String>,

    /// Author names in catalog order
    pub author_names: Vec<String>,

    /// Author keys in catalog order
    pub author_keys: Vec<String>,

    pub cover_image_id: Option<i64>,

    pub first_publish_year: Option<i32>,

    pub edition_count: Option<u32>,

    /// Number of languages the work is available in
    pub language_count: Option<usize>,

    pub ebook_access: Option<EbookAccess>,
}

impl BookSummary {
    /// Create a summary from a catalog key and title
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: extract_book_id(&key).to_string(),
            key,
            title: title.into(),
            subtitle: None,
            author_names: Vec::new(),
            author_keys: Vec::new(),
            cover_image_id: None,
            first_publish_year: None,
            edition_count: None,
            language_count: None,
            ebook_access: None,
        }
    }

    /// Add an author name
    pub fn with_author(mut self, name: impl Into<String>) -> Self {
        self.author_names.push(name.into());
        self
    }

    /// Set the cover image id
    pub fn with_cover(mut self, cover_image_id: i64) -> Self {
        self.cover_image_id = Some(cover_image_id);
        self
    }

    /// Whether the entry can be opened in a detail view
    pub fn is_linkable(&self) -> bool {
        !self.id.is_empty()
    }

    /// All author names joined, or the unknown-author fallback
    pub fn author_names_display(&self) -> String {
        if self.author_names.is_empty() {
            UNKNOWN_AUTHOR.to_string()
        } else {
            self.author_names.join(", ")
        }
    }

    /// First listed author, or the unknown-author fallback
    pub fn primary_author(&self) -> &str {
        self.author_names
            .first()
            .map(|s| s.as_str())
            .unwrap_or(UNKNOWN_AUTHOR)
    }
}
