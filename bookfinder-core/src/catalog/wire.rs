//! Upstream JSON documents and their normalization into core types

use crate::types::{
    extract_book_id, normalize_text, AuthorDetails, BookSummary, EbookAccess, ExternalLink,
    TextValue, WorkDetails,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchDocument {
    #[serde(rename = "numFound", default)]
    pub num_found: u64,

    #[serde(default)]
    pub docs: Vec<SearchDoc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchDoc {
    #[serde(default)]
    key: String,
    #[serde(default)]
    title: String,
    subtitle: Option<String>,
    #[serde(default)]
    author_name: Vec<String>,
    #[serde(default)]
    author_key: Vec<String>,
    cover_i: Option<i64>,
    first_publish_year: Option<i32>,
    edition_count: Option<u32>,
    #[serde(default)]
    language: Vec<String>,
    ebook_access: Option<String>,
}

impl From<SearchDoc> for BookSummary {
    fn from(doc: SearchDoc) -> Self {
        Self {
            id: extract_book_id(&doc.key).to_string(),
            key: doc.key,
            title: doc.title,
            subtitle: doc.subtitle,
            author_names: doc.author_name,
            author_keys: doc.author_key,
            cover_image_id: doc.cover_i,
            first_publish_year: doc.first_publish_year,
            edition_count: doc.edition_count,
            language_count: Some(doc.language.len()).filter(|n| *n > 0),
            ebook_access: doc
                .ebook_access
                .and_then(|access| access.parse::<EbookAccess>().ok()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct KeyRef {
    key: String,
}

#[derive(Debug, Deserialize)]
struct AuthorRole {
    author: Option<KeyRef>,
}

#[derive(Debug, Deserialize)]
struct LinkDocument {
    #[serde(default)]
    title: String,
    url: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WorkDocument {
    #[serde(default)]
    key: String,
    #[serde(default)]
    title: String,
    description: Option<TextValue>,
    #[serde(default)]
    covers: Vec<i64>,
    #[serde(default)]
    authors: Vec<AuthorRole>,
    #[serde(default)]
    subjects: Vec<String>,
    first_publish_date: Option<String>,
    #[serde(default)]
    links: Vec<LinkDocument>,
}

impl WorkDocument {
    /// Normalize, falling back to the requested id when the key is unusable
    pub fn into_details(self, requested_id: &str) -> WorkDetails {
        let id = match extract_book_id(&self.key) {
            "" => requested_id.to_string(),
            id => id.to_string(),
        };
        WorkDetails {
            id,
            title: self.title,
            description: normalize_text(self.description),
            cover_image_ids: self.covers,
            primary_author_key: self
                .authors
                .into_iter()
                .next()
                .and_then(|role| role.author)
                .map(|author| author.key)
                .filter(|key| !key.is_empty()),
            subjects: self.subjects,
            first_publish_date: self.first_publish_date,
            external_links: self
                .links
                .into_iter()
                .map(|link| ExternalLink {
                    title: link.title,
                    url: link.url,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AuthorDocument {
    #[serde(default)]
    key: String,
    #[serde(default)]
    name: String,
    birth_date: Option<String>,
    death_date: Option<String>,
    bio: Option<TextValue>,
    #[serde(default)]
    photos: Vec<i64>,
}

impl AuthorDocument {
    pub fn into_details(self, requested_key: &str) -> AuthorDetails {
        AuthorDetails {
            key: if self.key.is_empty() {
                requested_key.to_string()
            } else {
                self.key
            },
            name: self.name,
            birth_date: self.birth_date,
            death_date: self.death_date,
            bio: normalize_text(self.bio),
            photo_ids: self.photos,
        }
    }
}
