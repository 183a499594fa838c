/// Blog Service Library
///
/// Posts, groups, comments and the follow graph behind a small set of page
/// routes. Pages are rendered as JSON documents.
///
/// # Modules
///
/// - `cache`: in-process render cache for the index listing
/// - `config`: environment-driven configuration
/// - `db`: connection pool and embedded migrations
/// - `error`: error types and their HTTP mapping
/// - `forms`: post/comment form binding and validation
/// - `handlers`: HTTP request handlers and route table
/// - `metrics`: Prometheus collectors
/// - `middleware`: token authentication and the `CurrentUser` extractor
/// - `models`: data structures
/// - `pagination`: page-number pagination
/// - `repository`: storage seam and its PostgreSQL implementation
/// - `services`: business logic
pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod models;
pub mod pagination;
pub mod repository;
pub mod services;

use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, Result};

use cache::PageCache;
use repository::BlogRepository;
use services::{CommentService, FollowService, PostService};

/// Shared state handed to every handler through `web::Data`.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn BlogRepository>,
    pub page_cache: Arc<PageCache>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(repo: Arc<dyn BlogRepository>, config: Config) -> Self {
        Self {
            repo,
            page_cache: Arc::new(PageCache::from_secs(config.cache.index_ttl_secs)),
            config: Arc::new(config),
        }
    }

    pub fn posts(&self) -> PostService {
        PostService::new(self.repo.clone(), self.config.pagination.page_size)
    }

    pub fn comments(&self) -> CommentService {
        CommentService::new(self.repo.clone())
    }

    pub fn follows(&self) -> FollowService {
        FollowService::new(self.repo.clone())
    }
}
