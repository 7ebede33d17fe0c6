//! Keyed query cache with in-flight request sharing
//!
//! Every key maps to an entry holding the status of its request and either
//! the data or the error. At most one request per key is in flight: callers
//! asking for a pending key await the same shared future.

use crate::error::CatalogError;
use futures::future::{BoxFuture, FutureExt, Shared};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

type SharedFetch<T> = Shared<BoxFuture<'static, Result<Arc<T>, CatalogError>>>;

/// Lifecycle of a cached query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Fulfilled,
    Rejected,
}

enum Entry<T> {
    Pending(SharedFetch<T>),
    Fulfilled(Arc<T>),
    Rejected(CatalogError),
}

impl<T> Entry<T> {
    fn status(&self) -> QueryStatus {
        match self {
            Entry::Pending(_) => QueryStatus::Pending,
            Entry::Fulfilled(_) => QueryStatus::Fulfilled,
            Entry::Rejected(_) => QueryStatus::Rejected,
        }
    }
}

/// Cache of query results addressed by serialized query key
pub struct QueryCache<T> {
    entries: Mutex<HashMap<String, Entry<T>>>,
}

impl<T> Default for QueryCache<T> {
    fn default() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }
}

impl<T: Send + Sync + 'static> QueryCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached data for `key`, or run `loader` to produce it
    ///
    /// Fulfilled keys never hit the loader again. Rejected keys are retried on
    /// the next call; nothing retries on its own.
    pub async fn fetch<F, Fut>(&self, key: &str, loader: F) -> Result<Arc<T>, CatalogError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, CatalogError>> + Send + 'static,
    {
        let request = {
            let mut entries = self.lock();
            match entries.get(key) {
                Some(Entry::Fulfilled(data)) => {
                    tracing::debug!(key, "Query cache hit");
                    return Ok(data.clone());
                }
                Some(Entry::Pending(request)) => {
                    tracing::debug!(key, "Joining in-flight query");
                    request.clone()
                }
                Some(Entry::Rejected(_)) | None => {
                    tracing::debug!(key, "Query cache miss");
                    let request = loader().map(|r| r.map(Arc::new)).boxed().shared();
                    entries.insert(key.to_string(), Entry::Pending(request.clone()));
                    request
                }
            }
        };

        let outcome = request.clone().await;

        let mut entries = self.lock();
        let still_ours = matches!(
            entries.get(key),
            Some(Entry::Pending(current)) if current.ptr_eq(&request)
        );
        if still_ours {
            let entry = match &outcome {
                Ok(data) => Entry::Fulfilled(data.clone()),
                Err(e) => Entry::Rejected(e.clone()),
            };
            entries.insert(key.to_string(), entry);
        }

        outcome
    }

    /// Status of the entry for `key`, if one exists
    pub fn status(&self, key: &str) -> Option<QueryStatus> {
        self.lock().get(key).map(Entry::status)
    }

    /// Cached data for `key` without fetching
    pub fn get(&self, key: &str) -> Option<Arc<T>> {
        match self.lock().get(key) {
            Some(Entry::Fulfilled(data)) => Some(data.clone()),
            _ => None,
        }
    }

    /// Error recorded for `key`, if its last request failed
    pub fn error(&self, key: &str) -> Option<CatalogError> {
        match self.lock().get(key) {
            Some(Entry::Rejected(e)) => Some(e.clone()),
            _ => None,
        }
    }

    /// Number of keys with an entry
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Entry<T>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
