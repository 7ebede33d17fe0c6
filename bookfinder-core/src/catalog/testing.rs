//! Scripted transport for tests

use super::CatalogTransport;
use crate::error::CatalogError;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

/// Answers requests from a path → response table and counts calls
#[derive(Default)]
pub(crate) struct FakeTransport {
    responses: Mutex<HashMap<String, Result<Value, CatalogError>>>,
    calls: Mutex<Vec<String>>,
    delay: Mutex<Option<Duration>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Ok(body));
    }

    pub fn fail(&self, path: &str, error: CatalogError) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), Err(error));
    }

    /// Delay every response, to keep requests in flight
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock().unwrap() = Some(delay);
    }

    pub fn calls(&self, path: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|p| *p == path).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CatalogTransport for FakeTransport {
    async fn get_json(&self, path: &str) -> Result<Value, CatalogError> {
        self.calls.lock().unwrap().push(path.to_string());
        let delay = *self.delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let response = self.responses.lock().unwrap().get(path).cloned();
        response.unwrap_or_else(|| {
            Err(CatalogError::Status {
                status: 404,
                path: path.to_string(),
            })
        })
    }
}
