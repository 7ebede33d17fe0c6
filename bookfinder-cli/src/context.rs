//! Configuration resolution and shared services

use anyhow::{Context, Result};
use bookfinder_core::config::DEFAULT_PAGE_SIZE;
use bookfinder_core::storage::LocalStorage;
use bookfinder_core::{CatalogClient, CatalogConfig, RecentlyViewed, SearchSession};
use std::path::PathBuf;
use std::sync::Arc;

/// Settings resolved from flags, then environment, then defaults
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: Option<String>,
    pub data_dir: PathBuf,
    pub page_size: u32,
}

impl Settings {
    pub fn resolve(api_url: Option<String>, data_dir: Option<PathBuf>) -> Self {
        let api_url = api_url.or_else(|| std::env::var("BOOKFINDER_API_URL").ok());
        let data_dir = data_dir
            .or_else(|| std::env::var("BOOKFINDER_DATA_DIR").ok().map(PathBuf::from))
            .unwrap_or_else(default_data_dir);

        Self {
            api_url,
            data_dir,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn default_data_dir() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("org", "bookfinder", "Bookfinder") {
        proj_dirs.data_dir().to_path_buf()
    } else {
        // Fallback to current directory
        PathBuf::from("bookfinder_data")
    }
}

/// Services shared by every command
pub struct AppContext {
    pub catalog: Arc<CatalogClient>,
    pub recent: RecentlyViewed,
}

impl AppContext {
    pub fn new(settings: &Settings, page_size: u32) -> Result<Self> {
        let mut config = CatalogConfig::default().with_page_size(page_size);
        if let Some(api_url) = &settings.api_url {
            config = config.with_base_url(api_url.as_str());
        }
        tracing::debug!(
            "Using catalog {} and data dir {}",
            config.base_url,
            settings.data_dir.display()
        );

        let catalog = CatalogClient::new(config).context("Failed to create HTTP client")?;
        let storage = Arc::new(LocalStorage::new(&settings.data_dir));

        Ok(Self {
            catalog: Arc::new(catalog),
            recent: RecentlyViewed::new(storage),
        })
    }

    /// Fresh search session over the shared services
    pub fn session(&self) -> SearchSession {
        SearchSession::new(self.catalog.clone(), self.recent.clone())
    }

    pub fn covers_url(&self) -> &str {
        &self.catalog.config().covers_url
    }
}
