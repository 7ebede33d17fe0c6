//! Work and author detail records

use super::cover::{author_photo_url, cover_url, CoverSize};
use serde::{Deserialize, Serialize};

/// Placeholder shown when a work has no description
pub const NO_DESCRIPTION: &str = "No description available for this book.";

/// Placeholder shown when a work has no first publish date
pub const UNKNOWN_PUBLISH_DATE: &str = "Unknown";

/// Subjects shown on a detail page
pub const MAX_DISPLAYED_SUBJECTS: usize = 20;

/// A link to an external resource about a work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExternalLink {
    pub title: String,
    pub url: String,
}

/// Full record of a catalog work
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkDetails {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub cover_image_ids: Vec<i64>,

    /// Key of the first listed author, e.g. `/authors/OL23919A`
    pub primary_author_key: Option<String>,

    pub subjects: Vec<String>,
    pub first_publish_date: Option<String>,
    pub external_links: Vec<ExternalLink>,
}

impl WorkDetails {
    /// Description text or the fixed placeholder
    pub fn description_or_placeholder(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    /// First publish date or "Unknown"
    pub fn first_published(&self) -> &str {
        self.first_publish_date
            .as_deref()
            .unwrap_or(UNKNOWN_PUBLISH_DATE)
    }

    /// Subjects trimmed to the display limit
    pub fn displayed_subjects(&self) -> &[String] {
        let end = self.subjects.len().min(MAX_DISPLAYED_SUBJECTS);
        &self.subjects[..end]
    }

    /// URL of the first cover, if the work has one
    pub fn cover_url(&self, covers_url: &str, size: CoverSize) -> Option<String> {
        self.cover_image_ids
            .first()
            .map(|id| cover_url(covers_url, *id, size))
    }
}

/// Record of a catalog author
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthorDetails {
    pub key: String,
    pub name: String,
    pub birth_date: Option<String>,
    pub death_date: Option<String>,
    pub bio: Option<String>,
    pub photo_ids: Vec<i64>,
}

impl AuthorDetails {
    /// Life span such as `(1775 - 1817)`; `None` without a birth date
    pub fn life_span(&self) -> Option<String> {
        self.birth_date.as_ref().map(|birth| {
            format!(
                "({} - {})",
                birth,
                self.death_date.as_deref().unwrap_or("Present")
            )
        })
    }

    /// Biography or an empty string
    pub fn bio_or_empty(&self) -> &str {
        self.bio.as_deref().unwrap_or_default()
    }

    /// URL of the first photo, if any
    pub fn photo_url(&self, covers_url: &str, size: CoverSize) -> Option<String> {
        self.photo_ids
            .iter()
            .find(|id| **id > 0)
            .map(|id| author_photo_url(covers_url, *id, size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn work() -> WorkDetails {
        WorkDetails {
            id: "OL66554W".to_string(),
            title: "Pride and Prejudice".to_string(),
            description: None,
            cover_image_ids: vec![14348537],
            primary_author_key: Some("/authors/OL21594A".to_string()),
            subjects: (0..30).map(|i| format!("subject {}", i)).collect(),
            first_publish_date: None,
            external_links: Vec::new(),
        }
    }

    #[test]
    fn test_work_fallbacks() {
        let work = work();
        assert_eq!(work.description_or_placeholder(), NO_DESCRIPTION);
        assert_eq!(work.first_published(), "Unknown");
        assert_eq!(work.displayed_subjects().len(), MAX_DISPLAYED_SUBJECTS);
        assert_eq!(
            work.cover_url("https://covers.openlibrary.org", CoverSize::Large)
                .as_deref(),
            Some("https://covers.openlibrary.org/b/id/14348537-L.jpg")
        );
    }

    #[test]
    fn test_author_life_span() {
        let mut author = AuthorDetails {
            key: "/authors/OL21594A".to_string(),
            name: "Jane Austen".to_string(),
            birth_date: Some("16 December 1775".to_string()),
            death_date: None,
            bio: None,
            photo_ids: vec![-1],
        };
        assert_eq!(author.life_span().as_deref(), Some("(16 December 1775 - Present)"));
        assert_eq!(author.bio_or_empty(), "");
        assert_eq!(author.photo_url("https://covers.openlibrary.org", CoverSize::Small), None);

        author.birth_date = None;
        assert_eq!(author.life_span(), None);
    }
}
