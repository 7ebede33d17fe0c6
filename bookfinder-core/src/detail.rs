//! Detail view for a single work and its primary author
//!
//! The author lookup depends on the work: it is skipped until the work has
//! resolved with a primary author key. A failed author lookup only hides the
//! author panel; the work details still render.

use crate::catalog::CatalogClient;
use crate::error::CatalogError;
use crate::types::{AuthorDetails, WorkDetails};
use std::sync::Arc;

/// State of one lookup
#[derive(Debug, Clone)]
pub enum Lookup<T> {
    /// Not requested because its input is not known (yet)
    Skipped,
    Loading,
    Ready(Arc<T>),
    Failed(CatalogError),
}

impl<T> Lookup<T> {
    fn from_outcome(outcome: Result<Option<Arc<T>>, CatalogError>) -> Self {
        match outcome {
            Ok(Some(data)) => Lookup::Ready(data),
            Ok(None) => Lookup::Skipped,
            Err(e) => Lookup::Failed(e),
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Lookup::Ready(data) => Some(data.as_ref()),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&CatalogError> {
        match self {
            Lookup::Failed(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Lookup::Loading)
    }
}

/// Everything the detail page shows for one book
#[derive(Debug, Clone)]
pub struct DetailView {
    pub book_id: String,
    pub work: Lookup<WorkDetails>,
    pub author: Lookup<AuthorDetails>,
}

impl DetailView {
    /// A view whose lookups have not run yet
    pub fn pending(book_id: impl Into<String>) -> Self {
        let book_id = book_id.into();
        let work = if book_id.is_empty() {
            Lookup::Skipped
        } else {
            Lookup::Loading
        };
        Self {
            book_id,
            work,
            author: Lookup::Skipped,
        }
    }

    /// Fetch the work, then its primary author
    pub async fn load(catalog: &CatalogClient, book_id: impl Into<String>) -> Self {
        let mut view = Self::pending(book_id);
        view.resolve(catalog).await;
        view
    }

    /// Run the lookups in dependency order
    pub async fn resolve(&mut self, catalog: &CatalogClient) {
        self.work = Lookup::from_outcome(catalog.get_work_by_id(&self.book_id).await);

        let author_key = self
            .work
            .data()
            .and_then(|work| work.primary_author_key.clone())
            .unwrap_or_default();
        if author_key.is_empty() {
            self.author = Lookup::Skipped;
            return;
        }

        self.author = Lookup::from_outcome(catalog.get_author_by_key(&author_key).await);
        if let Lookup::Failed(e) = &self.author {
            tracing::warn!("Author lookup for {} failed: {}", author_key, e);
        }
    }

    pub fn is_loading(&self) -> bool {
        self.work.is_loading() || self.author.is_loading()
    }

    pub fn work(&self) -> Option<&WorkDetails> {
        self.work.data()
    }

    /// Author details, or `None` when the author panel should be omitted
    pub fn author(&self) -> Option<&AuthorDetails> {
        self.author.data()
    }
}
