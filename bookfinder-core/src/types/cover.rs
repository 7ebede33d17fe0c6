//! Cover and author photo URLs

use serde::{Deserialize, Serialize};

/// Image size accepted by the covers service
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum CoverSize {
    Small,
    Medium,
    #[default]
    Large,
}

impl CoverSize {
    /// Size suffix used in image paths
    pub fn suffix(self) -> &'static str {
        match self {
            CoverSize::Small => "S",
            CoverSize::Medium => "M",
            CoverSize::Large => "L",
        }
    }
}

/// URL of a book cover by cover image id
pub fn cover_url(covers_url: &str, cover_id: i64, size: CoverSize) -> String {
    format!(
        "{}/b/id/{}-{}.jpg",
        covers_url.trim_end_matches('/'),
        cover_id,
        size.suffix()
    )
}

/// URL of an author photo by photo id
pub fn author_photo_url(covers_url: &str, photo_id: i64, size: CoverSize) -> String {
    format!(
        "{}/a/id/{}-{}.jpg",
        covers_url.trim_end_matches('/'),
        photo_id,
        size.suffix()
    )
}
