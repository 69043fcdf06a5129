//! Library catalog server
//!
//! Browse, filter and sort a catalog of books, add authors and books, and
//! delete books. An author whose last book is deleted is removed with it.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;
pub mod views;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

use api::notice::NoticeCookie;
use repository::Repository;
use services::Services;
use views::Views;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub services: Arc<Services>,
    pub views: Arc<Views>,
    pub notices: NoticeCookie,
}

impl AppState {
    /// Wire services, views and notices around an opened repository
    pub fn new(config: &AppConfig, repository: Repository) -> AppResult<Self> {
        Ok(Self {
            services: Arc::new(Services::new(repository)),
            views: Arc::new(Views::new()?),
            notices: NoticeCookie::new(config.notices.cookie_name.clone()),
        })
    }
}
